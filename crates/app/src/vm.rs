//! Plain-text screens rendered from the session after every command.

use std::fmt::Write as _;

use services::{Phase, SessionState};
use timeline_core::model::{EVENT_SEPARATOR, EventId, Question, format_duration};

/// The screen for the current phase.
#[must_use]
pub fn render(state: &SessionState) -> String {
    match state.phase() {
        Phase::Menu => render_menu(state),
        Phase::Quiz => render_quiz(state),
        Phase::Result => render_result(state),
        Phase::Done => render_done(state),
    }
}

fn event_text(question: &Question, id: EventId) -> &str {
    question.item(id).map_or("?", |record| record.event())
}

fn render_menu(state: &SessionState) -> String {
    let dataset = state.dataset();
    let presets = state
        .settings()
        .run_presets()
        .iter()
        .map(|n| format!("start {n}"))
        .collect::<Vec<_>>()
        .join(" | ");

    let mut out = String::from("== Timeline quiz ==\n");
    let _ = writeln!(
        out,
        "{} events in {} groups ({} playable)",
        dataset.len(),
        dataset.groups().len(),
        dataset.eligible_groups().len()
    );
    if !state.user_name().is_empty() {
        let _ = writeln!(out, "player: {}", state.user_name());
    }
    if !state.history().is_empty() {
        let _ = writeln!(
            out,
            "answered so far: {} ({} correct), total time {}",
            state.history().len(),
            state.history().correct_count(),
            format_duration(state.total_elapsed_secs())
        );
    }
    let _ = writeln!(out, "{presets} | custom N");
    out
}

fn render_quiz(state: &SessionState) -> String {
    let Some(question) = state.current_question() else {
        return String::from("(no question)\n");
    };
    let progress = state.progress();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "== Question {}/{} ({}) ==",
        progress.current.unwrap_or(progress.answered),
        progress.total,
        question.group_id()
    );
    out.push_str("Put these events in order, oldest first.\n");

    out.push_str("your answer:\n");
    if state.answer().chosen().is_empty() {
        out.push_str("  (empty)\n");
    }
    for (i, id) in state.answer().chosen().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, event_text(question, *id));
    }

    if !state.answer().remaining().is_empty() {
        out.push_str("remaining:\n");
        for (i, id) in state.answer().remaining().iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", i + 1, event_text(question, *id));
        }
    }
    if state.answer().is_complete() {
        out.push_str("all events placed: `submit`, `undo` or `reset`\n");
    }
    out
}

fn render_result(state: &SessionState) -> String {
    let mut out = String::new();
    let Some(result) = state.last_result() else {
        return out;
    };
    let _ = writeln!(
        out,
        "== {} ({}) ==",
        if result.verdict.is_correct() { "Correct" } else { "Incorrect" },
        format_duration(result.elapsed_secs)
    );
    let _ = writeln!(out, "your answer: {}", result.chosen.join(EVENT_SEPARATOR));
    out.push_str("correct order:\n");
    for (i, label) in result.correct_labelled.iter().enumerate() {
        let _ = writeln!(out, "  {}. {label}", i + 1);
    }
    let _ = writeln!(
        out,
        "{}/{} answered, `next` to continue",
        state.run_answered(),
        state.run_total_questions()
    );
    out
}

fn render_done(state: &SessionState) -> String {
    let mut out = String::from("== Run complete ==\n");
    match state.run_summary() {
        Ok(summary) => {
            let _ = writeln!(
                out,
                "{} answered: {} correct, {} incorrect",
                summary.answered(),
                summary.correct(),
                summary.incorrect()
            );
            let _ = writeln!(
                out,
                "run time {}, total time {}",
                format_duration(summary.run_elapsed_secs()),
                format_duration(summary.total_elapsed_secs())
            );
        }
        Err(err) => {
            let _ = writeln!(out, "summary unavailable: {err}");
        }
    }
    out.push_str("`export` to save your history, `menu` for another run\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use services::SessionEvent;
    use timeline_core::model::{Dataset, QuizSettings, RunLength};
    use timeline_core::time::fixed_now;

    fn state() -> (SessionState, StdRng) {
        let dataset =
            Dataset::from_pairs((0..12).map(|i| (format!("event {i}"), format!("{}", 1600 + i * 7)))).unwrap();
        (SessionState::new(dataset, QuizSettings::default()), StdRng::seed_from_u64(5))
    }

    #[test]
    fn menu_lists_dataset_and_presets() {
        let (state, _) = state();
        let screen = render(&state);
        assert!(screen.contains("12 events in 2 groups (1 playable)"));
        assert!(screen.contains("start 5 | start 10 | custom N"));
    }

    #[test]
    fn quiz_shows_progress_and_remaining_events() {
        let (mut state, mut rng) = state();
        state
            .apply(SessionEvent::Start(RunLength::Preset(5)), &mut rng, fixed_now())
            .unwrap();
        let first = state.answer().remaining()[0];
        state.apply(SessionEvent::Pick(first), &mut rng, fixed_now()).unwrap();

        let screen = render(&state);
        assert!(screen.contains("== Question 1/5 (group-1) =="));
        assert!(screen.contains("  1. event "));
        assert!(screen.contains("  [3] event "));
        assert!(!screen.contains("  [4] "));
    }

    #[test]
    fn result_joins_answer_and_lists_correct_order_with_keys() {
        let (mut state, mut rng) = state();
        state
            .apply(SessionEvent::Start(RunLength::Custom(2)), &mut rng, fixed_now())
            .unwrap();
        let remaining = state.answer().remaining().to_vec();
        state.apply(SessionEvent::Pick(remaining[0]), &mut rng, fixed_now()).unwrap();
        state.apply(SessionEvent::Pick(remaining[1]), &mut rng, fixed_now()).unwrap();
        state.apply(SessionEvent::Submit, &mut rng, fixed_now()).unwrap();

        let screen = render(&state);
        let result = state.last_result().unwrap();
        assert!(screen.starts_with("== Incorrect (0m0s) =="));
        assert!(screen.contains(&format!("your answer: {} ➞ {}\n", result.chosen[0], result.chosen[1])));
        assert!(!screen.contains('→'));
        assert!(screen.contains("（16"));
        assert!(screen.contains("1/2 answered"));
    }

    #[test]
    fn done_shows_summary() {
        let (mut state, mut rng) = state();
        state
            .apply(SessionEvent::Start(RunLength::Custom(1)), &mut rng, fixed_now())
            .unwrap();
        let order: Vec<_> = state.current_question().unwrap().correct_order().collect();
        for id in order {
            state.apply(SessionEvent::Pick(id), &mut rng, fixed_now()).unwrap();
        }
        state.apply(SessionEvent::Submit, &mut rng, fixed_now()).unwrap();

        let screen = render(&state);
        assert!(screen.contains("== Run complete =="));
        assert!(screen.contains("1 answered: 1 correct, 0 incorrect"));
    }
}
