use std::time::Duration;

use rate_gate::{Interrupt, LeakyBucket, LeakyBucketConfig, ManualTime, Rejection, TimeSource};

fn new_bucket(rate: u64, capacity: usize) -> (ManualTime, LeakyBucket<ManualTime>) {
    let time = ManualTime::new();
    let bucket = LeakyBucket::with_time_source(&LeakyBucketConfig { rate, capacity }, time.clone())
        .unwrap();
    (time, bucket)
}

#[test]
fn test_new_leaky_bucket() {
    let bucket = LeakyBucket::new(4, 3);
    assert_eq!(bucket.rate(), 4);
    assert_eq!(bucket.capacity(), 3);
    assert_eq!(bucket.gap(), Duration::from_millis(250));
    assert_eq!(bucket.in_flight(), 0);
}

#[test]
#[should_panic(expected = "rate must be greater than 0")]
fn test_new_with_zero_rate() {
    LeakyBucket::new(0, 1);
}

#[test]
#[should_panic(expected = "capacity must be greater than 0")]
fn test_new_with_zero_capacity() {
    LeakyBucket::new(1, 0);
}

#[test]
fn test_rate_above_one_per_nanosecond_rejected() {
    assert!(LeakyBucket::try_new(1_000_000_000, 1).is_ok());
    assert!(LeakyBucket::try_new(1_000_000_001, 1).is_err());
}

#[test]
fn test_gap_truncates() {
    let bucket = LeakyBucket::new(3, 1);
    assert_eq!(bucket.gap(), Duration::from_nanos(333_333_333));
}

#[test]
fn test_first_departure_one_gap_after_construction() {
    let (time, bucket) = new_bucket(2, 2);
    assert!(bucket.try_acquire());
    assert_eq!(time.now_nanos(), 500_000_000);
    assert_eq!(bucket.next_departure(), 500_000_000);
}

#[test]
fn test_departures_spaced_by_gap() {
    let (time, bucket) = new_bucket(10, 4);
    let mut departures = Vec::new();
    for _ in 0..6 {
        assert!(bucket.try_acquire());
        departures.push(time.now_nanos());
    }

    for pair in departures.windows(2) {
        assert_eq!(pair[1] - pair[0], 100_000_000);
    }
}

#[test]
fn test_burst_arrivals_are_queued_onto_schedule() {
    let (time, bucket) = new_bucket(2, 2);

    // Arrivals at a frozen instant still leave one gap apart
    time.set(100_000_000);
    assert!(bucket.try_acquire());
    let first = time.now_nanos();
    assert!(bucket.try_acquire());
    let second = time.now_nanos();

    assert_eq!(first, 500_000_000);
    assert_eq!(second, 1_000_000_000);
}

#[test]
fn test_idle_rebase_departs_now() {
    let (time, bucket) = new_bucket(2, 2);
    assert!(bucket.try_acquire());
    assert_eq!(bucket.next_departure(), 500_000_000);

    // Idle for longer than gap * capacity past the last slot
    time.set(500_000_000 + 1_000_000_001);
    let now = time.now_nanos();
    assert!(bucket.try_acquire());
    assert_eq!(bucket.next_departure(), now);
    assert_eq!(time.now_nanos(), now);

    // The schedule carries on from the rebased slot
    assert!(bucket.try_acquire());
    assert_eq!(time.now_nanos(), now + 500_000_000);
}

#[test]
fn test_no_rebase_at_exact_threshold() {
    let (time, bucket) = new_bucket(2, 2);
    assert!(bucket.try_acquire());

    // Exactly gap * capacity behind: not yet stale, one more gap is added
    time.set(1_500_000_000);
    assert!(bucket.try_acquire());
    assert_eq!(bucket.next_departure(), 1_000_000_000);
    assert_eq!(time.now_nanos(), 1_500_000_000);
}

#[test]
fn test_gate_released_after_departure() {
    let (_time, bucket) = new_bucket(1, 1);
    assert!(bucket.try_acquire());
    assert_eq!(bucket.in_flight(), 0);
    assert!(bucket.try_acquire());
    assert_eq!(bucket.in_flight(), 0);
}

#[test]
fn test_interrupted_wait_is_rejection() {
    let (_time, bucket) = new_bucket(1, 1);
    let interrupt = Interrupt::new();
    interrupt.interrupt();

    assert_eq!(
        bucket.try_acquire_verbose_interruptible(&interrupt),
        Err(Rejection::Interrupted)
    );
    assert!(!bucket.try_acquire_interruptible(&interrupt));

    // Gate slot was released on the interrupted path
    assert_eq!(bucket.in_flight(), 0);
    assert!(bucket.try_acquire());
}

#[test]
fn test_interrupted_caller_keeps_its_slot_consumed() {
    let (time, bucket) = new_bucket(1, 2);
    let interrupt = Interrupt::new();
    interrupt.interrupt();

    assert!(!bucket.try_acquire_interruptible(&interrupt));
    assert_eq!(bucket.next_departure(), 1_000_000_000);

    assert!(bucket.try_acquire());
    assert_eq!(time.now_nanos(), 2_000_000_000);
}

#[test]
fn test_uninterrupted_handle_admits() {
    let (_time, bucket) = new_bucket(5, 1);
    let interrupt = Interrupt::new();
    assert_eq!(bucket.try_acquire_verbose_interruptible(&interrupt), Ok(()));
}
