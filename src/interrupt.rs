//! Cancellation handle for pacing waits.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A cloneable handle that cuts a pacing wait short.
///
/// Every clone observes the same flag. Once triggered the handle stays
/// triggered; create a new one to wait again.
///
/// # Example
///
/// ```rust
/// use rate_gate::Interrupt;
///
/// let interrupt = Interrupt::new();
/// let remote = interrupt.clone();
/// remote.interrupt();
/// assert!(interrupt.is_interrupted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    triggered: Mutex<bool>,
    wakeup: Condvar,
}

impl Interrupt {
    /// Creates a handle that has not been triggered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers the interrupt, waking every thread currently waiting on it.
    pub fn interrupt(&self) {
        let mut triggered = self.inner.triggered.lock();
        *triggered = true;
        self.inner.wakeup.notify_all();
    }

    /// Whether [`interrupt`](Self::interrupt) has been called on any clone.
    pub fn is_interrupted(&self) -> bool {
        *self.inner.triggered.lock()
    }

    /// Blocks for `timeout` unless interrupted first.
    ///
    /// Returns `true` if the full timeout elapsed, `false` if the interrupt
    /// fired (before or during the wait).
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            // Unrepresentable deadline: wait until interrupted.
            None => {
                let mut triggered = self.inner.triggered.lock();
                while !*triggered {
                    self.inner.wakeup.wait(&mut triggered);
                }
                return false;
            }
        };

        let mut triggered = self.inner.triggered.lock();
        while !*triggered {
            if self
                .inner
                .wakeup
                .wait_until(&mut triggered, deadline)
                .timed_out()
            {
                return !*triggered;
            }
        }
        false
    }
}
