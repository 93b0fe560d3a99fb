//! Monotonic time sources.
//!
//! The limiters never read the system clock directly. They go through a
//! [`TimeSource`], which reports nanoseconds since an arbitrary origin and
//! knows how to wait for a deadline. [`MonotonicTime`] is the production
//! source; [`ManualTime`] is advanced by hand and makes timing tests
//! deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::interrupt::Interrupt;
use crate::types::Nanos;

/// A monotonic source of time.
pub trait TimeSource: Send + Sync {
    /// Nanoseconds since this source's origin. Never decreases.
    fn now_nanos(&self) -> Nanos;

    /// Blocks the calling thread until [`now_nanos`](Self::now_nanos) reaches `deadline`.
    ///
    /// Returns `false` if `interrupt` fired before the deadline was reached.
    /// A deadline in the past returns immediately.
    fn sleep_until(&self, deadline: Nanos, interrupt: Option<&Interrupt>) -> bool;
}

/// Time source backed by [`std::time::Instant`].
///
/// Clones share the same origin, so their readings are comparable.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    /// Creates a source whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_nanos(&self) -> Nanos {
        Nanos::try_from(self.origin.elapsed().as_nanos()).unwrap_or(Nanos::MAX)
    }

    fn sleep_until(&self, deadline: Nanos, interrupt: Option<&Interrupt>) -> bool {
        let wait = Duration::from_nanos(deadline.saturating_sub(self.now_nanos()));
        match interrupt {
            Some(interrupt) => interrupt.wait_timeout(wait),
            None => {
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
                true
            }
        }
    }
}

/// A hand-driven time source.
///
/// Time only moves when [`advance`](Self::advance) or [`set`](Self::set) is
/// called, or when a sleeper jumps it forward to its deadline. Clones share
/// the same counter.
///
/// ```rust
/// use std::time::Duration;
/// use rate_gate::{ManualTime, TimeSource};
///
/// let time = ManualTime::new();
/// time.advance(Duration::from_millis(250));
/// assert_eq!(time.now_nanos(), 250_000_000);
///
/// // Sleeping jumps straight to the deadline.
/// assert!(time.sleep_until(1_000_000_000, None));
/// assert_eq!(time.now_nanos(), 1_000_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    nanos: Arc<AtomicU64>,
}

impl ManualTime {
    /// Creates a source starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`, saturating at [`Nanos::MAX`].
    pub fn advance(&self, by: Duration) {
        let by = Nanos::try_from(by.as_nanos()).unwrap_or(Nanos::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                Some(now.saturating_add(by))
            });
    }

    /// Moves time to `nanos`. Requests to move backwards are ignored.
    pub fn set(&self, nanos: Nanos) {
        self.nanos.fetch_max(nanos, Ordering::AcqRel);
    }
}

impl TimeSource for ManualTime {
    fn now_nanos(&self) -> Nanos {
        self.nanos.load(Ordering::Acquire)
    }

    fn sleep_until(&self, deadline: Nanos, interrupt: Option<&Interrupt>) -> bool {
        if interrupt.map_or(false, Interrupt::is_interrupted) {
            return false;
        }
        self.set(deadline);
        true
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now_nanos(&self) -> Nanos {
        (**self).now_nanos()
    }

    fn sleep_until(&self, deadline: Nanos, interrupt: Option<&Interrupt>) -> bool {
        (**self).sleep_until(deadline, interrupt)
    }
}
