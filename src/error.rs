//! error.rs
//! Construction errors and rejection reasons.

use crate::types::Uint;
use thiserror::Error;

/// Returned when a limiter is built from an invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("capacity must be greater than 0")]
    ZeroCapacity,
    /// More waiting callers than the admission gate can track.
    #[error("capacity must not exceed {max}, got {capacity}")]
    CapacityTooLarge { capacity: usize, max: usize },
    #[error("rate must be greater than 0")]
    ZeroRate,
    /// The departure gap would round down to zero nanoseconds.
    #[error("rate must not exceed 1_000_000_000 permits per second, got {rate}")]
    RateTooHigh { rate: Uint },
    #[error("window must be greater than 0")]
    ZeroWindow,
}

/// Why a `try_acquire` call was refused.
///
/// Rejection is the routine overload outcome, not a fault: callers should
/// retry later or drop the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The current window has no room left for the request.
    #[error("window exhausted: tried to acquire {acquiring}, {used} of {capacity} already reserved")]
    WindowExhausted {
        acquiring: Uint,
        used: Uint,
        capacity: Uint,
    },
    /// The request alone is larger than a whole window's capacity and can never succeed.
    #[error("request exceeds window capacity: tried to acquire {acquiring}, capacity {capacity}")]
    BeyondCapacity { acquiring: Uint, capacity: Uint },
    /// All admission gate slots are held by callers waiting for their departure.
    #[error("admission gate full: {capacity} caller(s) already queued")]
    GateFull { capacity: usize },
    /// The wait for the scheduled departure was interrupted.
    #[error("interrupted while waiting for departure slot")]
    Interrupted,
}

/// Result type for acquire operations.
pub type AcquireResult = Result<(), Rejection>;
