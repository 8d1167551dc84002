//! Drives the line shell end to end over a CSV on disk.

use std::io::Cursor;

use services::{Phase, QuizLoop};
use timeline_core::AvailabilityPolicy;
use timeline_core::model::QuizSettings;
use timeline_core::time::fixed_clock;
use timeline_quiz::Shell;

const EVENTS: &str = "\u{feff}出来事,年号
大化の改新,645
壬申の乱,672
大宝律令,701
平城京遷都,710
墾田永年私財法,743
平安京遷都,794
承平天慶の乱,939
保元の乱,1156
平治の乱,1159
壇ノ浦の戦い,1185
承久の乱,1221
";

#[test]
fn incorrect_run_then_export_and_menu() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("nihonshi.csv");
    std::fs::write(&csv, EVENTS).unwrap();

    let dataset = storage::load_dataset(&csv).unwrap();
    assert_eq!(dataset.len(), 11);
    let quiz = QuizLoop::seeded(fixed_clock(), 2024, dataset, QuizSettings::default());
    let mut shell = Shell::new(quiz, AvailabilityPolicy::default(), dir.path());

    let mut script = String::from("name 山田\nstart 5\n");
    for _ in 0..5 {
        script.push_str("1\nsubmit\nnext\n");
    }
    script.push_str("export\nmenu\nquit\n");

    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();
    let screen = String::from_utf8(out).unwrap();

    assert!(screen.contains("== Question 5/5"));
    assert!(screen.contains("5 answered: 0 correct, 5 incorrect"));
    assert!(screen.contains("history saved to"));
    assert_eq!(shell.quiz().state().phase(), Phase::Menu);
    assert_eq!(shell.quiz().state().history().len(), 5);

    let export = dir.path().join("山田_20231115_071320.csv");
    let text = std::fs::read_to_string(export).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 6);
    assert!(rows[0].ends_with("group,events,sort_keys,verdict,duration,cumulative_time"));
    assert!(rows[1..].iter().all(|row| row.contains(",incorrect,0m0s,0m0s")));
}
