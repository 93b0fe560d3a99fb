use std::time::Duration;

use rate_gate::{Clock, ManualTime, TimeUnit};

fn started_at_zero() -> (ManualTime, Clock<ManualTime>) {
    let time = ManualTime::new();
    let clock = Clock::create_started(time.clone());
    (time, clock)
}

#[test]
fn test_create_started_is_running_with_zero_elapsed() {
    let (_time, clock) = started_at_zero();
    assert!(clock.is_running());
    assert_eq!(clock.elapsed_nanos(), 0);
}

#[test]
fn test_new_clock_is_stopped() {
    let time = ManualTime::new();
    let clock = Clock::new(time.clone());
    time.advance(Duration::from_secs(3));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed_nanos(), 0);
}

#[test]
fn test_elapsed_is_live_while_running() {
    let (time, clock) = started_at_zero();
    time.advance(Duration::from_millis(40));
    assert_eq!(clock.elapsed(), Duration::from_millis(40));
    time.advance(Duration::from_millis(60));
    assert_eq!(clock.elapsed(), Duration::from_millis(100));
}

#[test]
fn test_stop_freezes_elapsed() {
    let (time, mut clock) = started_at_zero();
    time.advance(Duration::from_millis(250));
    clock.stop();
    assert!(!clock.is_running());

    time.advance(Duration::from_secs(5));
    assert_eq!(clock.elapsed(), Duration::from_millis(250));
}

#[test]
fn test_stop_twice_does_not_double_count() {
    let (time, mut clock) = started_at_zero();
    time.advance(Duration::from_millis(100));
    clock.stop();
    time.advance(Duration::from_millis(100));
    clock.stop();
    assert_eq!(clock.elapsed(), Duration::from_millis(100));
}

#[test]
fn test_restart_accumulates_intervals() {
    let (time, mut clock) = started_at_zero();
    time.advance(Duration::from_millis(100));
    clock.stop();

    // Paused time is not counted
    time.advance(Duration::from_millis(900));
    clock.start();
    time.advance(Duration::from_millis(50));

    assert_eq!(clock.elapsed(), Duration::from_millis(150));
}

#[test]
fn test_start_while_running_is_noop() {
    let (time, mut clock) = started_at_zero();
    time.advance(Duration::from_millis(300));
    clock.start();
    assert_eq!(clock.elapsed(), Duration::from_millis(300));
}

#[test]
fn test_reset_zeroes_and_stops() {
    let (time, mut clock) = started_at_zero();
    time.advance(Duration::from_secs(2));
    clock.reset();

    assert!(!clock.is_running());
    assert_eq!(clock.elapsed_nanos(), 0);

    // Reset does not restart
    time.advance(Duration::from_secs(1));
    assert_eq!(clock.elapsed_nanos(), 0);

    clock.start();
    time.advance(Duration::from_millis(10));
    assert_eq!(clock.elapsed(), Duration::from_millis(10));
}

#[test]
fn test_elapsed_in_units_truncates() {
    let (time, clock) = started_at_zero();
    time.advance(Duration::from_millis(1999));

    assert_eq!(clock.elapsed_in(TimeUnit::Nanoseconds), 1_999_000_000);
    assert_eq!(clock.elapsed_in(TimeUnit::Microseconds), 1_999_000);
    assert_eq!(clock.elapsed_in(TimeUnit::Milliseconds), 1999);
    assert_eq!(clock.elapsed_in(TimeUnit::Seconds), 1);
    assert_eq!(clock.elapsed_in(TimeUnit::Minutes), 0);
}

#[test]
fn test_large_units() {
    assert_eq!(TimeUnit::Minutes.convert(125 * 1_000_000_000), 2);
    assert_eq!(TimeUnit::Hours.convert(TimeUnit::Hours.nanos() * 3 + 1), 3);
    assert_eq!(TimeUnit::Days.convert(TimeUnit::Hours.nanos() * 47), 1);
}

#[test]
fn test_monotonic_clock_advances() {
    let clock = Clock::started();
    std::thread::sleep(Duration::from_millis(20));
    assert!(clock.elapsed() >= Duration::from_millis(20));
}
