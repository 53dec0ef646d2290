use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use flagquiz::config::GameConfig;
use flagquiz::countries::EMOJI_COUNTRIES;
use flagquiz::quiz::{Advance, Phase, Quiz, Resolution, TickOutcome, Verdict};
use flagquiz::runtime::{FixedTicker, QuizEvent, Runner, TestEventSource};

fn key(c: char) -> QuizEvent {
    QuizEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> QuizEvent {
    QuizEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

// Minimal front end: keys edit/submit/advance, ticks count down.
fn apply(quiz: &mut Quiz, runner: &mut Runner<TestEventSource, FixedTicker>, ev: QuizEvent) {
    match ev {
        QuizEvent::Tick => {
            let _ = quiz.tick();
        }
        QuizEvent::Resize => {}
        QuizEvent::Key(k) => match (quiz.phase(), k.code) {
            (Phase::Playing, KeyCode::Char(c)) => quiz.push_char(c).unwrap(),
            (Phase::Playing, KeyCode::Enter) => {
                quiz.submit().unwrap();
            }
            (Phase::Revealed, KeyCode::Enter) => {
                if let Advance::Question(_) = quiz.next().unwrap() {
                    runner.rearm();
                }
            }
            _ => {}
        },
    }
}

// Drives a complete three-round session through the Runner without a TTY,
// answering every question correctly via key events.
#[test]
fn headless_session_all_correct() {
    let mut quiz = Quiz::start(
        GameConfig::default(),
        &EMOJI_COUNTRIES,
        StdRng::seed_from_u64(21),
    )
    .unwrap();

    let (tx, rx) = mpsc::channel();
    for pair in quiz.questions().iter() {
        for c in pair.country.chars() {
            tx.send(key(c)).unwrap();
        }
        tx.send(enter()).unwrap();
        tx.send(enter()).unwrap();
    }

    // Long interval so no tick interferes with the scripted answers
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_secs(3600)),
    );

    for _ in 0..10_000u32 {
        if quiz.state().game_over {
            break;
        }
        let ev = runner.step();
        apply(&mut quiz, &mut runner, ev);
    }

    assert!(quiz.state().game_over);
    assert_eq!(quiz.state().score, 15);
    assert!(quiz.tick().is_err());
    assert!(quiz.submit().is_err());
}

#[test]
fn headless_countdown_times_out() {
    let config = GameConfig {
        rounds: 1,
        questions_per_round: 2,
        timer_seconds: 3,
    };
    let mut quiz = Quiz::start(config, &EMOJI_COUNTRIES, StdRng::seed_from_u64(2)).unwrap();

    let (_tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let mut ticks = 0;
    for _ in 0..50u32 {
        if let QuizEvent::Tick = runner.step() {
            ticks += 1;
            if let Ok(TickOutcome::TimedOut) = quiz.tick() {
                break;
            }
        }
    }

    assert_eq!(ticks, 3);
    assert_eq!(quiz.state().resolution, Some(Resolution::TimedOut));
    assert_eq!(quiz.state().score, 0);

    // Ticks that keep arriving after the reveal are rejected
    for _ in 0..3 {
        assert!(matches!(runner.step(), QuizEvent::Tick));
        assert!(quiz.tick().is_err());
    }
    assert_eq!(quiz.state().time_remaining, 0);

    // The next question gets a full countdown
    assert_eq!(quiz.next(), Ok(Advance::Question(1)));
    runner.rearm();
    assert_eq!(quiz.state().time_remaining, 3);
}

#[test]
fn headless_mixed_answers() {
    let config = GameConfig {
        rounds: 2,
        questions_per_round: 2,
        timer_seconds: 30,
    };
    let mut quiz = Quiz::start(config, &EMOJI_COUNTRIES, StdRng::seed_from_u64(8)).unwrap();

    // right, wrong, right (shouting), timeout
    let first = quiz.current_question().country;
    quiz.set_answer(first).unwrap();
    assert_eq!(quiz.submit(), Ok(Verdict::Correct));
    quiz.next().unwrap();

    quiz.set_answer("Atlantis").unwrap();
    assert_eq!(quiz.submit(), Ok(Verdict::Incorrect));
    quiz.next().unwrap();
    assert_eq!(quiz.round(), 2);
    assert_eq!(quiz.question_in_round(), 1);

    let third = quiz.current_question().country.to_uppercase();
    quiz.set_answer(format!(" {} ", third)).unwrap();
    assert_eq!(quiz.submit(), Ok(Verdict::Correct));
    quiz.next().unwrap();

    while quiz.phase() == Phase::Playing {
        quiz.tick().unwrap();
    }
    assert!(quiz.is_last_question());
    assert_eq!(quiz.next(), Ok(Advance::Finished));
    assert_eq!(quiz.state().score, 2);
}

#[test]
fn headless_restart_after_game_over() {
    let config = GameConfig {
        rounds: 1,
        questions_per_round: 1,
        timer_seconds: 10,
    };
    let mut quiz = Quiz::start(config, &EMOJI_COUNTRIES, StdRng::seed_from_u64(5)).unwrap();
    quiz.submit().unwrap();
    quiz.next().unwrap();
    assert_eq!(quiz.phase(), Phase::GameOver);

    quiz.restart().unwrap();
    assert_eq!(quiz.phase(), Phase::Playing);
    assert_eq!(quiz.state().time_remaining, 10);
    assert_eq!(quiz.state().score, 0);
}
