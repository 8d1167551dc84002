mod dataset;
mod history;
mod ids;
mod question;
mod record;
mod session;
mod settings;

pub use dataset::{Dataset, DatasetError, GROUP_SIZE, QUESTION_SIZE, RawTable};
pub use history::{EVENT_SEPARATOR, History, HistoryEntry, KEY_SEPARATOR, format_duration};
pub use ids::{EventId, GroupId};
pub use question::{Question, QuestionError, Verdict};
pub use record::{EventRecord, SortKey};
pub use session::{RunSummary, RunSummaryError};
pub use settings::{QuizSettings, RunLength, SettingsError};
