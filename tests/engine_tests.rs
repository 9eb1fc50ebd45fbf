//! Integration tests for the timer engine.
//!
//! These drive `TimerEngine` through whole Pomodoro cycles on a
//! `ManualClock`, so every expiry happens at an exact, repeatable instant.

use std::time::Duration;

use pomodoro::engine::{Clock, ManualClock, TimerEngine};
use pomodoro::settings::{Settings, SettingsRecord};
use pomodoro::types::{Phase, PhaseEnded, Tick};

const MINUTE: Duration = Duration::from_secs(60);

// ============================================================================
// Test Helpers
// ============================================================================

fn settings(work: f64, short: f64, long: f64, cycles: f64) -> Settings {
    Settings::default().merge(&SettingsRecord {
        work: Some(work),
        short: Some(short),
        long: Some(long),
        cycles: Some(cycles),
        sound: None,
    })
}

fn engine_with(settings: Settings) -> (TimerEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (TimerEngine::with_clock(settings, clock.clone()), clock)
}

/// Starts the current phase and lets it run out. Returns the signal.
fn complete_phase(engine: &mut TimerEngine<ManualClock>, clock: &ManualClock) -> PhaseEnded {
    let length = engine.remaining();
    engine.start();
    clock.advance(length);
    engine
        .tick()
        .phase_ended()
        .expect("phase should end exactly at its deadline")
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_two_cycle_scenario() {
    let (mut engine, clock) = engine_with(settings(1.0, 1.0, 15.0, 2.0));
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.remaining(), MINUTE);

    // Work -> short break
    engine.start();
    clock.advance(Duration::from_secs(30));
    assert_eq!(
        engine.tick(),
        Tick::Running {
            remaining: Duration::from_secs(30)
        }
    );
    clock.advance(Duration::from_secs(30));
    let event = engine.tick().phase_ended().unwrap();
    assert_eq!(event.ended_phase, Phase::Work);
    assert_eq!(engine.phase(), Phase::ShortBreak);
    assert_eq!(engine.remaining(), Duration::from_millis(60_000));
    assert_eq!(engine.cycle_count(), 1);
    assert!(!engine.is_running());

    // Short break -> work
    let event = complete_phase(&mut engine, &clock);
    assert_eq!(event.ended_phase, Phase::ShortBreak);
    assert_eq!(engine.phase(), Phase::Work);

    // Second work phase -> long break
    let event = complete_phase(&mut engine, &clock);
    assert_eq!(event.ended_phase, Phase::Work);
    assert_eq!(engine.phase(), Phase::LongBreak);
    assert_eq!(engine.cycle_count(), 2);
    assert_eq!(engine.remaining(), 15 * MINUTE);
}

#[test]
fn test_default_cycle_pattern() {
    let (mut engine, clock) = engine_with(Settings::default());

    let mut breaks = Vec::new();
    for _ in 0..8 {
        complete_phase(&mut engine, &clock);
        breaks.push(engine.phase());
        complete_phase(&mut engine, &clock);
    }

    use Phase::{LongBreak as L, ShortBreak as S};
    assert_eq!(breaks, vec![S, S, S, L, S, S, S, L]);
    assert_eq!(engine.cycle_count(), 8);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_exactly_one_signal_per_expiry() {
    for minutes in [1.0, 5.0, 25.0, 600.0] {
        let (mut engine, clock) = engine_with(settings(minutes, 5.0, 15.0, 4.0));
        let length = engine.remaining();
        engine.start();

        clock.advance(length - Duration::from_millis(1));
        assert!(engine.tick().phase_ended().is_none());

        clock.advance(Duration::from_millis(1));
        assert!(engine.tick().phase_ended().is_some());
        assert_eq!(engine.remaining(), 5 * MINUTE);

        clock.advance(MINUTE);
        assert!(engine.tick().phase_ended().is_none());
    }
}

#[test]
fn test_late_tick_still_signals_once() {
    let (mut engine, clock) = engine_with(settings(1.0, 5.0, 15.0, 4.0));
    engine.start();

    clock.advance(10 * MINUTE);

    assert!(engine.tick().phase_ended().is_some());
    assert!(engine.tick().phase_ended().is_none());
    assert_eq!(engine.phase(), Phase::ShortBreak);
}

#[test]
fn test_tick_is_idempotent_at_same_instant() {
    let (mut engine, clock) = engine_with(Settings::default());
    engine.start();
    clock.advance(3 * MINUTE);

    let now = clock.now();
    let first = engine.tick_at(now);
    let second = engine.tick_at(now);

    assert_eq!(first, second);
    assert_eq!(engine.snapshot().remaining, 22 * MINUTE);
}

#[test]
fn test_remaining_never_increases_while_running() {
    let (mut engine, clock) = engine_with(Settings::default());
    engine.start();

    let mut last = engine.remaining();
    for _ in 0..50 {
        clock.advance(Duration::from_millis(700));
        engine.tick();
        let now = engine.remaining();
        assert!(now <= last);
        last = now;
    }
}

#[test]
fn test_pause_resume_without_elapsed_time() {
    let (mut engine, clock) = engine_with(Settings::default());
    engine.start();
    clock.advance(Duration::from_millis(12_345));
    engine.pause();
    let paused = engine.remaining();

    engine.resume();
    engine.pause();

    assert_eq!(engine.remaining(), paused);
}

#[test]
fn test_paused_time_does_not_count() {
    let (mut engine, clock) = engine_with(Settings::default());
    engine.start();
    clock.advance(5 * MINUTE);
    engine.pause();

    clock.advance(60 * MINUTE);
    assert_eq!(engine.tick(), Tick::Idle { remaining: 20 * MINUTE });

    engine.resume();
    clock.advance(20 * MINUTE);
    assert!(engine.tick().phase_ended().is_some());
}

#[test]
fn test_reset_from_any_state() {
    let (mut engine, clock) = engine_with(settings(1.0, 1.0, 1.0, 2.0));
    complete_phase(&mut engine, &clock);
    complete_phase(&mut engine, &clock);
    engine.start();
    clock.advance(Duration::from_secs(20));

    engine.reset();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, Phase::Work);
    assert_eq!(snapshot.cycle_count, 0);
    assert_eq!(snapshot.remaining, MINUTE);
    assert!(!snapshot.running);
}

#[test]
fn test_settings_change_while_idle_and_running() {
    let (mut engine, clock) = engine_with(Settings::default());

    engine.apply_settings_change(Settings::default().with_work_minutes(50.0));
    assert_eq!(engine.remaining(), 50 * MINUTE);

    engine.start();
    clock.advance(MINUTE);
    engine.apply_settings_change(Settings::default().with_work_minutes(10.0));
    assert_eq!(engine.remaining(), 49 * MINUTE);

    engine.reset();
    assert_eq!(engine.remaining(), 10 * MINUTE);
}

#[test]
fn test_display_projection_follows_state() {
    let (mut engine, clock) = engine_with(Settings::default());

    let display = engine.display();
    assert_eq!(display.phase_label, "Work");
    assert_eq!(display.remaining_formatted, "25:00");
    assert!(display.can_start && !display.can_pause && display.can_resume);

    engine.start();
    clock.advance(Duration::from_millis(1_500));
    let display = engine.display();
    assert_eq!(display.remaining_formatted, "24:58");
    assert!(!display.can_start && display.can_pause && !display.can_resume);
}

#[test]
fn test_fractional_minutes_time_exactly() {
    let (mut engine, clock) = engine_with(settings(1.5, 0.25, 2.0, 4.0));
    assert_eq!(engine.remaining(), Duration::from_secs(90));

    engine.start();
    clock.advance(Duration::from_secs(89));
    assert!(engine.tick().phase_ended().is_none());

    clock.advance(Duration::from_secs(1));
    assert!(engine.tick().phase_ended().is_some());
    assert_eq!(engine.phase(), Phase::ShortBreak);
    assert_eq!(engine.remaining(), Duration::from_secs(60));
}
