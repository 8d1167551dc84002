use chrono::Duration;
use services::{Clock, Phase, QuizLoop, SessionEvent};
use timeline_core::model::{Dataset, QuizSettings, RunLength, Verdict};
use timeline_core::time::fixed_now;

fn dataset() -> Dataset {
    let pairs = [
        ("Taika Reform", "645"),
        ("Heijo-kyo capital", "710"),
        ("Heian-kyo capital", "794"),
        ("Kamakura shogunate", "1185"),
        ("Mongol invasion", "1274"),
        ("Kenmu Restoration", "1333"),
        ("Onin War", "1467"),
        ("Battle of Sekigahara", "1600"),
        ("Sakoku edict", "1639"),
        ("Meiji Restoration", "1868"),
        ("Russo-Japanese War", "1904"),
        ("Great Kanto earthquake", "1923"),
    ];
    Dataset::from_pairs(pairs).unwrap()
}

#[test]
fn five_question_run_reaches_done_once() {
    let mut quiz = QuizLoop::seeded(
        Clock::fixed(fixed_now()),
        2024,
        dataset(),
        QuizSettings::default(),
    );
    quiz.dispatch(SessionEvent::Start(RunLength::Preset(5)))
        .unwrap();
    assert_eq!(quiz.state().phase(), Phase::Quiz);

    let mut finished = 0;
    let mut round = 0;
    while quiz.state().phase() != Phase::Done {
        round += 1;
        quiz.clock_mut().advance(Duration::seconds(10));

        let mut order: Vec<_> = quiz
            .state()
            .current_question()
            .expect("question in quiz phase")
            .correct_order()
            .collect();
        if round % 2 == 0 {
            order.swap(0, 3);
        }
        for id in order {
            quiz.dispatch(SessionEvent::Pick(id)).unwrap();
        }

        let transition = quiz.dispatch(SessionEvent::Submit).unwrap();
        finished += usize::from(transition.finished_run());
        let scored = transition.scored.expect("submit scores");
        if round % 2 == 0 {
            assert_eq!(scored.verdict, Verdict::Incorrect);
            assert_eq!(quiz.state().phase(), Phase::Result);
            let transition = quiz.dispatch(SessionEvent::Next).unwrap();
            finished += usize::from(transition.finished_run());
        } else {
            assert_eq!(scored.verdict, Verdict::Correct);
        }
    }

    assert_eq!(finished, 1);
    assert_eq!(round, 5);
    assert_eq!(quiz.state().run_answered(), 5);
    assert_eq!(quiz.state().history().len(), 5);
    assert_eq!(quiz.state().total_elapsed_secs(), 50);

    let summary = quiz.state().run_summary().unwrap();
    assert_eq!(summary.correct(), 3);
    assert_eq!(summary.incorrect(), 2);

    quiz.dispatch(SessionEvent::ReturnToMenu).unwrap();
    assert_eq!(quiz.state().phase(), Phase::Menu);
    assert_eq!(quiz.state().history().len(), 5);
}

#[test]
fn history_entries_describe_each_question() {
    let mut quiz = QuizLoop::seeded(
        Clock::fixed(fixed_now()),
        7,
        dataset(),
        QuizSettings::default(),
    );
    quiz.dispatch(SessionEvent::Start(RunLength::Custom(1)))
        .unwrap();

    let question = quiz.state().current_question().unwrap().clone();
    let presented = quiz.state().presented().to_vec();
    for id in &presented {
        quiz.dispatch(SessionEvent::Pick(*id)).unwrap();
    }
    quiz.clock_mut().advance(Duration::seconds(3));
    quiz.dispatch(SessionEvent::Submit).unwrap();

    let entry = &quiz.state().history().entries()[0];
    assert_eq!(entry.group_id(), question.group_id());
    let expected_chosen: Vec<_> = presented
        .iter()
        .map(|id| question.item(*id).unwrap().event())
        .collect();
    assert_eq!(entry.chosen_order(), expected_chosen.join(" ➞ "));
    let expected_keys: Vec<_> = question
        .items()
        .iter()
        .map(|r| r.sort_key().to_string())
        .collect();
    assert_eq!(entry.correct_keys(), expected_keys.join(" / "));
    assert_eq!(entry.duration_secs(), 3);
}
