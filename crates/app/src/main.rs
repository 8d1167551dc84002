use std::io;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use services::{Clock, QuizLoop, SessionEvent};
use timeline_core::model::QuizSettings;
use timeline_quiz::{Cli, DEFAULT_LOG_FILTER, Shell};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::system();
    let policy = cli.availability()?;
    // Checked once; a session already underway is never cut off.
    policy.check(clock.now())?;

    let dataset = storage::load_dataset(&cli.file)?;
    info!(
        file = %cli.file.display(),
        rows = dataset.len(),
        playable_groups = dataset.eligible_groups().len(),
        "dataset loaded"
    );

    let settings = QuizSettings::default();
    let mut quiz = match cli.seed {
        Some(seed) => QuizLoop::seeded(clock, seed, dataset, settings),
        None => QuizLoop::new(clock, dataset, settings),
    };
    if let Some(user) = cli.user {
        quiz.dispatch(SessionEvent::SetUserName(user))?;
    }

    let mut shell = Shell::new(quiz, policy, cli.export_dir);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    shell.run(stdin, &mut stdout)?;
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        // At this layer (binary glue), printing once is fine.
        error!(error = %err, "timeline-quiz stopped");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
