use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tracing::{debug, trace};

use crate::config::LeakyBucketConfig;
use crate::error::{AcquireResult, ConfigError, Rejection};
use crate::interrupt::Interrupt;
use crate::rate_limit::RateLimit;
use crate::time_source::{MonotonicTime, TimeSource};
use crate::types::{Nanos, Uint, NANOS_PER_SECOND};

/// Leaky bucket (pacing) rate limiter.
///
/// Models a server draining requests at a constant `rate`, with room for at
/// most `capacity` waiting callers. Each admitted caller is assigned a
/// departure slot `gap = 1s / rate` after the previous one and is put to
/// sleep until that slot arrives, smoothing bursty arrivals into an even
/// output rate.
///
/// # Algorithm Behavior
///
/// - A caller first takes a slot in the admission gate without blocking; if
///   `capacity` callers are already waiting, it is rejected immediately
/// - Under a short lock, the caller claims the next departure slot
/// - If the schedule has fallen more than `gap * capacity` behind the current
///   time, the bucket has been idle and the schedule is rebased to now, so
///   unused past slots cannot be cashed in as a burst
/// - The caller sleeps until its slot outside the lock, then releases its
///   gate slot
///
/// After an idle rebase the caller departs at once rather than one `gap`
/// later, so the first call after a quiet period does not wait.
///
/// An interrupted sleep is a rejection. The gate slot is released on every
/// exit path.
///
/// # Example
///
/// ```rust
/// use rate_gate::{LeakyBucket, LeakyBucketConfig, ManualTime, TimeSource};
///
/// let time = ManualTime::new();
/// let config = LeakyBucketConfig { rate: 2, capacity: 2 };
/// let bucket = LeakyBucket::with_time_source(&config, time.clone()).unwrap();
///
/// assert!(bucket.try_acquire());
/// assert_eq!(time.now_nanos(), 500_000_000);
/// assert!(bucket.try_acquire());
/// assert_eq!(time.now_nanos(), 1_000_000_000);
/// ```
#[derive(Debug)]
pub struct LeakyBucket<T: TimeSource = MonotonicTime> {
    /// Departures per second
    rate: Uint,
    /// Nanoseconds between successive departures
    gap: Nanos,
    /// Callers allowed to wait for a departure at once
    capacity: usize,
    /// Admission gate; one permit per waiting caller
    gate: Semaphore,
    /// Most recently assigned departure slot
    next_departure: Mutex<Nanos>,
    time: T,
}

impl LeakyBucket<MonotonicTime> {
    /// Creates a bucket draining `rate` requests per second with room for
    /// `capacity` waiting callers.
    ///
    /// # Panics
    ///
    /// Panics if `rate` or `capacity` is zero, or if `rate` exceeds one per
    /// nanosecond.
    pub fn new(rate: Uint, capacity: usize) -> Self {
        Self::try_new(rate, capacity).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Creates a bucket draining `rate` requests per second with room for
    /// `capacity` waiting callers.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] describing the first invalid parameter.
    pub fn try_new(rate: Uint, capacity: usize) -> Result<Self, ConfigError> {
        Self::from_config(&LeakyBucketConfig { rate, capacity })
    }

    /// Creates a bucket from `config` on a fresh [`MonotonicTime`].
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`LeakyBucketConfig::validate`].
    pub fn from_config(config: &LeakyBucketConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, MonotonicTime::new())
    }
}

impl<T: TimeSource> LeakyBucket<T> {
    /// Creates a bucket that reads time from, and sleeps on, `time`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`LeakyBucketConfig::validate`].
    pub fn with_time_source(config: &LeakyBucketConfig, time: T) -> Result<Self, ConfigError> {
        config.validate()?;

        let next_departure = time.now_nanos();
        Ok(LeakyBucket {
            rate: config.rate,
            gap: NANOS_PER_SECOND / config.rate,
            capacity: config.capacity,
            gate: Semaphore::new(config.capacity),
            next_departure: Mutex::new(next_departure),
            time,
        })
    }

    /// Attempts to admit one request, sleeping until its departure slot.
    ///
    /// Returns `false` immediately if the bucket is full.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_verbose().is_ok()
    }

    /// Like [`try_acquire`](Self::try_acquire), but the wait ends early with
    /// `false` if `interrupt` fires.
    pub fn try_acquire_interruptible(&self, interrupt: &Interrupt) -> bool {
        self.try_acquire_verbose_interruptible(interrupt).is_ok()
    }

    /// Attempts to admit one request, reporting why it was refused.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The request reached its departure slot
    /// * `Err(Rejection::GateFull)` - `capacity` callers are already waiting
    pub fn try_acquire_verbose(&self) -> AcquireResult {
        self.acquire_slot(None)
    }

    /// Interruptible form of [`try_acquire_verbose`](Self::try_acquire_verbose).
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The request reached its departure slot
    /// * `Err(Rejection::GateFull)` - `capacity` callers are already waiting
    /// * `Err(Rejection::Interrupted)` - `interrupt` fired before the departure slot
    pub fn try_acquire_verbose_interruptible(&self, interrupt: &Interrupt) -> AcquireResult {
        self.acquire_slot(Some(interrupt))
    }

    fn acquire_slot(&self, interrupt: Option<&Interrupt>) -> AcquireResult {
        // Non-blocking; no async runtime is involved.
        let _permit = match self.gate.try_acquire() {
            Ok(permit) => permit,
            Err(_) => {
                trace!(capacity = self.capacity, "admission gate full");
                return Err(Rejection::GateFull {
                    capacity: self.capacity,
                });
            }
        };

        let departure = self.schedule_departure();

        // Sleep without holding the schedule lock so later callers can claim
        // their own slots meanwhile.
        if self.time.sleep_until(departure, interrupt) {
            trace!(departure, "departed");
            Ok(())
        } else {
            debug!(departure, "interrupted while waiting for departure");
            Err(Rejection::Interrupted)
        }
    }

    /// Claims the next departure slot.
    fn schedule_departure(&self) -> Nanos {
        let mut next = self.next_departure.lock();
        let now = self.time.now_nanos();

        let capacity = Nanos::try_from(self.capacity).unwrap_or(Nanos::MAX);
        let stale_after = next.saturating_add(self.gap.saturating_mul(capacity));
        if now > stale_after {
            debug!(idle_nanos = now - *next, "departure schedule stale, rebasing to now");
            *next = now;
        } else {
            *next = next.saturating_add(self.gap);
        }
        *next
    }

    /// Departures per second.
    pub fn rate(&self) -> Uint {
        self.rate
    }

    /// Spacing between successive departures.
    pub fn gap(&self) -> Duration {
        Duration::from_nanos(self.gap)
    }

    /// Maximum number of callers allowed to wait at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Callers currently holding a gate slot.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.gate.available_permits()
    }

    /// The most recently assigned departure slot, in the time source's nanoseconds.
    pub fn next_departure(&self) -> Nanos {
        *self.next_departure.lock()
    }

    /// The time source this bucket reads and sleeps on.
    pub fn time_source(&self) -> &T {
        &self.time
    }
}

impl<T: TimeSource> RateLimit for LeakyBucket<T> {
    fn try_acquire_verbose(&self) -> AcquireResult {
        self.acquire_slot(None)
    }
}
