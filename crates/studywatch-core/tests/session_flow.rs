//! End-to-end session timelines driven by synthetic timestamps.
//!
//! The engine takes `now` from the caller, so these tests walk a whole
//! study day without sleeping.

use chrono::{DateTime, Duration, TimeZone, Utc};
use studywatch_core::{
    minutes, BreakPolicy, CoreError, Event, InvalidOperation, SessionEngine, SessionState,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn at(secs: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(secs)
}

#[test]
fn study_break_expiry_timeline() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());

    engine.toggle_run(t0()).unwrap();
    assert_eq!(engine.state(), SessionState::Running);

    // Ten minutes of study earn a 600 / 5 = 120s break.
    let event = engine.toggle_break(at(600)).unwrap();
    match event {
        Event::BreakStarted {
            studied_secs,
            break_secs,
            ..
        } => {
            assert_eq!(studied_secs, 600);
            assert_eq!(break_secs, 120);
        }
        other => panic!("expected BreakStarted, got {other:?}"),
    }
    assert_eq!(engine.state(), SessionState::Breaking);

    // One second before expiry.
    let tick = engine.tick(at(600 + 119));
    assert_eq!(tick.display, Duration::seconds(1));
    assert!(tick.event.is_none());
    assert_eq!(engine.state(), SessionState::Breaking);

    // Past expiry: report zero, stop, complete exactly once.
    let tick = engine.tick(at(600 + 121));
    assert_eq!(tick.display, Duration::zero());
    assert!(matches!(tick.event, Some(Event::BreakCompleted { .. })));
    assert_eq!(engine.state(), SessionState::Stopped);
    assert_eq!(engine.break_remaining(at(600 + 121)), Duration::zero());

    // Later ticks stay quiet.
    let tick = engine.tick(at(600 + 122));
    assert!(tick.event.is_none());
    let tick = engine.tick(at(600 + 200));
    assert!(tick.event.is_none());
}

#[test]
fn pause_does_not_leak_into_study_time() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());

    engine.toggle_run(t0()).unwrap();
    engine.toggle_run(at(600)).unwrap();
    assert_eq!(engine.tick(at(900)).display, Duration::seconds(600));

    engine.toggle_run(at(900)).unwrap();
    assert_eq!(engine.tick(at(1200)).display, Duration::seconds(900));
}

#[test]
fn rejected_operations_leave_the_timeline_intact() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());
    engine.toggle_run(t0()).unwrap();

    // Too early for a break.
    let err = engine.toggle_break(at(200)).unwrap_err();
    match err {
        CoreError::InvalidOperation(InvalidOperation::BreakTooEarly {
            studied_secs,
            required_secs,
        }) => {
            assert_eq!(studied_secs, 200);
            assert_eq!(required_secs, 300);
        }
        other => panic!("expected BreakTooEarly, got {other:?}"),
    }

    // The rejection cost no time.
    assert_eq!(engine.tick(at(400)).display, Duration::seconds(400));

    engine.toggle_break(at(400)).unwrap();
    let err = engine.toggle_run(at(410)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidOperation(InvalidOperation::PauseDuringBreak)
    ));
    assert_eq!(engine.state(), SessionState::Breaking);
    assert_eq!(engine.tick(at(420)).display, Duration::seconds(60));
}

#[test]
fn long_session_earns_the_steeper_ratio() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());
    engine.toggle_run(t0()).unwrap();

    let event = engine.toggle_break(at(3500)).unwrap();
    match event {
        Event::BreakStarted { break_secs, .. } => assert_eq!(break_secs, 1000),
        other => panic!("expected BreakStarted, got {other:?}"),
    }
}

#[test]
fn adjustments_reshape_a_break_in_both_directions() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());
    engine.toggle_run(t0()).unwrap();
    engine.toggle_break(at(600)).unwrap();

    // Two rewinds buy twenty extra seconds of break.
    engine.rewind(at(610), Duration::seconds(10));
    engine.rewind(at(610), Duration::seconds(10));
    assert_eq!(engine.tick(at(610)).display, Duration::seconds(130));

    // Fast-forward past the end: the next tick completes the break.
    for _ in 0..14 {
        engine.fast_forward(at(620), Duration::seconds(10));
    }
    let tick = engine.tick(at(620));
    assert!(matches!(tick.event, Some(Event::BreakCompleted { .. })));
    assert_eq!(engine.state(), SessionState::Stopped);
}

#[test]
fn display_strings_follow_the_state() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());
    assert_eq!(minutes(engine.tick(t0()).display), "00");

    engine.toggle_run(t0()).unwrap();
    assert_eq!(minutes(engine.tick(at(125)).display), "02");

    engine.toggle_break(at(600)).unwrap();
    assert_eq!(minutes(engine.tick(at(600)).display), "02");
    assert_eq!(minutes(engine.tick(at(660)).display), "01");
}

#[test]
fn a_whole_morning_with_two_breaks() {
    let mut engine = SessionEngine::new(BreakPolicy::default(), t0());

    engine.toggle_run(t0()).unwrap();
    engine.toggle_break(at(1500)).unwrap();
    assert_eq!(engine.tick(at(1500)).display, Duration::seconds(300));

    // Cut the break short after a minute and study on.
    engine.toggle_break(at(1560)).unwrap();
    assert_eq!(engine.state(), SessionState::Running);

    // Study resumes from the break origin: 3000s of study at t0+4500.
    engine.toggle_break(at(4500)).unwrap();
    match engine.snapshot(at(4500)) {
        Event::StateSnapshot {
            state,
            break_remaining_secs,
            ..
        } => {
            assert_eq!(state, SessionState::Breaking);
            // 3000s studied hits the long-session ratio: 3000 / 3.5.
            assert_eq!(break_remaining_secs, 857);
        }
        other => panic!("expected StateSnapshot, got {other:?}"),
    }
}
