use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::FixedWindowCounterConfig;
use crate::error::{AcquireResult, ConfigError, Rejection};
use crate::rate_limit::RateLimit;
use crate::time_source::{MonotonicTime, TimeSource};
use crate::types::{Nanos, Uint};

/// Fixed window counter rate limiter.
///
/// Grants up to `capacity` permits per window (one second by default). The
/// window is measured from the moment it began: the first call observing
/// that the window has elapsed starts a fresh one with an empty counter.
///
/// # Algorithm Behavior
///
/// - Each call first checks whether the current window has elapsed and, if
///   so, replaces the counter and restarts the window clock
/// - The requested permits are then added to the counter unconditionally
/// - The call is admitted iff the new total is within `capacity`
///
/// Rejected calls still count against the window. Two over-capacity calls in
/// a row keep the counter above `capacity`, so even a one-permit call fails
/// until the window rolls over.
///
/// # Window Boundaries
///
/// Rollover is a hard cutover. Up to `capacity` permits can be granted at the
/// tail of one window and another `capacity` at the head of the next, so the
/// instantaneous rate near a boundary can reach twice the configured limit.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rate_gate::{FixedWindowCounter, FixedWindowCounterConfig, ManualTime};
///
/// let time = ManualTime::new();
/// let config = FixedWindowCounterConfig { capacity: 3, ..Default::default() };
/// let counter = FixedWindowCounter::with_time_source(&config, time.clone()).unwrap();
///
/// assert!(counter.try_acquire_permits(3));
/// assert!(!counter.try_acquire());
///
/// // One second later the window rolls over.
/// time.advance(Duration::from_secs(1));
/// assert!(counter.try_acquire_permits(3));
/// ```
#[derive(Debug)]
pub struct FixedWindowCounter<T: TimeSource = MonotonicTime> {
    /// Maximum number of permits granted per window
    capacity: Uint,
    /// Window length in nanoseconds
    window: Nanos,
    /// Counter and window clock, updated together under one lock
    state: Mutex<FixedWindowCounterState<T>>,
}

#[derive(Debug)]
struct FixedWindowCounterState<T: TimeSource> {
    /// Permits reserved in the active window, including rejected requests
    used: Uint,
    /// Time since the active window began
    clock: Clock<T>,
}

impl FixedWindowCounter<MonotonicTime> {
    /// Creates a limiter granting `capacity` permits per second.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: Uint) -> Self {
        Self::try_new(capacity).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Creates a limiter granting `capacity` permits per second.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroCapacity` if `capacity` is zero.
    pub fn try_new(capacity: Uint) -> Result<Self, ConfigError> {
        Self::from_config(&FixedWindowCounterConfig {
            capacity,
            ..Default::default()
        })
    }

    /// Creates a limiter granting `capacity` permits per `window`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `window` is zero.
    pub fn with_window(capacity: Uint, window: Duration) -> Self {
        Self::from_config(&FixedWindowCounterConfig { capacity, window })
            .unwrap_or_else(|err| panic!("{}", err))
    }

    /// Creates a limiter from `config` on a fresh [`MonotonicTime`].
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`FixedWindowCounterConfig::validate`].
    pub fn from_config(config: &FixedWindowCounterConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, MonotonicTime::new())
    }
}

impl<T: TimeSource> FixedWindowCounter<T> {
    /// Creates a limiter that reads time from `time`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`FixedWindowCounterConfig::validate`].
    pub fn with_time_source(
        config: &FixedWindowCounterConfig,
        time: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(FixedWindowCounter {
            capacity: config.capacity,
            window: Nanos::try_from(config.window.as_nanos()).unwrap_or(Nanos::MAX),
            state: Mutex::new(FixedWindowCounterState {
                used: 0,
                clock: Clock::create_started(time),
            }),
        })
    }

    /// Attempts to acquire a single permit.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_permits(1)
    }

    /// Attempts to acquire `permits` permits in the current window.
    ///
    /// Returns `false` when the window's capacity would be exceeded. The
    /// permits are counted against the window either way.
    pub fn try_acquire_permits(&self, permits: Uint) -> bool {
        self.try_acquire_verbose_permits(permits).is_ok()
    }

    /// Attempts to acquire `permits` permits, reporting why a request was refused.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The permits were granted
    /// * `Err(Rejection::BeyondCapacity)` - `permits` alone exceeds a window's capacity
    /// * `Err(Rejection::WindowExhausted)` - Not enough room left in the current window
    ///
    /// # Example
    ///
    /// ```rust
    /// use rate_gate::{FixedWindowCounter, Rejection};
    ///
    /// let counter = FixedWindowCounter::new(10);
    /// assert_eq!(counter.try_acquire_verbose_permits(8), Ok(()));
    /// assert_eq!(
    ///     counter.try_acquire_verbose_permits(5),
    ///     Err(Rejection::WindowExhausted { acquiring: 5, used: 8, capacity: 10 })
    /// );
    /// ```
    pub fn try_acquire_verbose_permits(&self, permits: Uint) -> AcquireResult {
        // Rollover, reservation and comparison form one critical section.
        let mut state = self.state.lock();

        if state.clock.elapsed_nanos() >= self.window {
            debug!(reserved = state.used, capacity = self.capacity, "window elapsed, rolling over");
            state.used = 0;
            state.clock.reset();
            state.clock.start();
        }

        let previously_used = state.used;
        state.used = state.used.saturating_add(permits);
        let used = state.used;
        drop(state);

        if used <= self.capacity {
            trace!(permits, used, capacity = self.capacity, "permits granted");
            return Ok(());
        }

        trace!(permits, used, capacity = self.capacity, "permits rejected");
        if permits > self.capacity {
            Err(Rejection::BeyondCapacity {
                acquiring: permits,
                capacity: self.capacity,
            })
        } else {
            Err(Rejection::WindowExhausted {
                acquiring: permits,
                used: previously_used,
                capacity: self.capacity,
            })
        }
    }

    /// Maximum permits granted per window.
    pub fn capacity(&self) -> Uint {
        self.capacity
    }

    /// Length of each window.
    pub fn window(&self) -> Duration {
        Duration::from_nanos(self.window)
    }

    /// Permits reserved in the current window, rejected requests included.
    ///
    /// Reports zero once the window has elapsed, even if no call has rolled
    /// it over yet. Does not modify the limiter.
    pub fn used(&self) -> Uint {
        let state = self.state.lock();
        if state.clock.elapsed_nanos() >= self.window {
            0
        } else {
            state.used
        }
    }

    /// Permits still available in the current window.
    pub fn remaining(&self) -> Uint {
        self.capacity.saturating_sub(self.used())
    }
}

impl<T: TimeSource> RateLimit for FixedWindowCounter<T> {
    fn try_acquire_verbose(&self) -> AcquireResult {
        self.try_acquire_verbose_permits(1)
    }
}
