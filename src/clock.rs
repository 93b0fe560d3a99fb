//! A start/stop stopwatch over a [`TimeSource`].

use std::time::Duration;

use crate::time_source::{MonotonicTime, TimeSource};
use crate::types::Nanos;

/// Units accepted by [`Clock::elapsed_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Nanoseconds in one unit.
    pub const fn nanos(self) -> Nanos {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60 * 1_000_000_000,
            TimeUnit::Hours => 60 * 60 * 1_000_000_000,
            TimeUnit::Days => 24 * 60 * 60 * 1_000_000_000,
        }
    }

    /// Converts a nanosecond count into this unit, truncating toward zero.
    ///
    /// ```rust
    /// use rate_gate::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::Seconds.convert(1_999_999_999), 1);
    /// assert_eq!(TimeUnit::Milliseconds.convert(999_999), 0);
    /// ```
    pub const fn convert(self, nanos: Nanos) -> u64 {
        nanos / self.nanos()
    }
}

/// Measures elapsed time, with support for pausing and resetting.
///
/// Elapsed time is the sum of every completed running interval plus the
/// current one if the clock is running. Reading it has no side effects.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rate_gate::{Clock, ManualTime, TimeUnit};
///
/// let time = ManualTime::new();
/// let mut clock = Clock::create_started(time.clone());
///
/// time.advance(Duration::from_millis(1500));
/// assert_eq!(clock.elapsed_in(TimeUnit::Seconds), 1);
///
/// clock.stop();
/// time.advance(Duration::from_secs(10));
/// assert_eq!(clock.elapsed(), Duration::from_millis(1500));
///
/// clock.reset();
/// assert!(!clock.is_running());
/// assert_eq!(clock.elapsed_nanos(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Clock<T: TimeSource = MonotonicTime> {
    time: T,
    /// Reading of `time` when the current interval began. Meaningless while stopped.
    start: Nanos,
    /// Total of all completed intervals.
    accumulated: Nanos,
    running: bool,
}

impl Clock<MonotonicTime> {
    /// Creates a running clock on a fresh [`MonotonicTime`].
    pub fn started() -> Self {
        Self::create_started(MonotonicTime::new())
    }
}

impl<T: TimeSource> Clock<T> {
    /// Creates a stopped clock with zero elapsed time.
    pub fn new(time: T) -> Self {
        Clock {
            time,
            start: 0,
            accumulated: 0,
            running: false,
        }
    }

    /// Creates a clock that is already running with zero elapsed time.
    pub fn create_started(time: T) -> Self {
        let mut clock = Self::new(time);
        clock.start();
        clock
    }

    /// Starts timing from now. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.start = self.time.now_nanos();
    }

    /// Folds the current interval into the accumulated total and pauses.
    ///
    /// Stopping a clock that is not running does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.accumulated = self.accumulated.saturating_add(self.current_interval());
        self.running = false;
    }

    /// Discards all elapsed time and leaves the clock stopped.
    ///
    /// Call [`start`](Self::start) afterwards to keep timing.
    pub fn reset(&mut self) {
        self.accumulated = 0;
        self.running = false;
    }

    /// Whether an interval is currently being timed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total elapsed nanoseconds, live while running and frozen while stopped.
    pub fn elapsed_nanos(&self) -> Nanos {
        if self.running {
            self.accumulated.saturating_add(self.current_interval())
        } else {
            self.accumulated
        }
    }

    /// Total elapsed time as a [`Duration`].
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos())
    }

    /// Elapsed time in `unit`, truncated.
    pub fn elapsed_in(&self, unit: TimeUnit) -> u64 {
        unit.convert(self.elapsed_nanos())
    }

    /// The time source this clock reads.
    pub fn time_source(&self) -> &T {
        &self.time
    }

    fn current_interval(&self) -> Nanos {
        self.time.now_nanos().saturating_sub(self.start)
    }
}
