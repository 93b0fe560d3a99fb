//! Common trait for the limiter algorithms.
//!
//! Lets callers hold either limiter behind `Box<dyn RateLimit>` or
//! `Arc<dyn RateLimit>` and share it across threads.

use crate::error::AcquireResult;

/// The admission decision shared by every limiter.
pub trait RateLimit: Send + Sync {
    /// Attempts to admit one request, reporting why it was refused.
    ///
    /// # Returns
    /// * `Ok(())` if the request may proceed
    /// * `Err(Rejection)` describing the refusal
    fn try_acquire_verbose(&self) -> AcquireResult;

    /// Attempts to admit one request.
    ///
    /// `false` is a routine overload outcome; retry later or drop the request.
    fn try_acquire(&self) -> bool {
        self.try_acquire_verbose().is_ok()
    }
}
