//! Construction-time limiter configuration.
//!
//! Limits are fixed once a limiter is built. With the `serde` feature the
//! config structs can be deserialized straight out of a host application's
//! settings file.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tokio::sync::Semaphore;

use crate::error::ConfigError;
use crate::rate_limiters::{FixedWindowCounter, LeakyBucket};
use crate::types::{Uint, NANOS_PER_SECOND};

/// Settings for a [`FixedWindowCounter`].
///
/// ```rust
/// use rate_gate::FixedWindowCounterConfig;
///
/// let limiter = FixedWindowCounterConfig { capacity: 5, ..Default::default() }
///     .build()
///     .unwrap();
/// assert_eq!(limiter.capacity(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FixedWindowCounterConfig {
    /// Permits granted per window.
    pub capacity: Uint,
    /// Window length. Defaults to one second.
    pub window: Duration,
}

impl Default for FixedWindowCounterConfig {
    fn default() -> Self {
        FixedWindowCounterConfig {
            capacity: 1,
            window: Duration::from_secs(1),
        }
    }
}

impl FixedWindowCounterConfig {
    /// Checks that the limits describe a usable limiter.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ZeroCapacity` - `capacity` is zero
    /// * `ConfigError::ZeroWindow` - `window` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(())
    }

    /// Builds a limiter on a fresh [`MonotonicTime`](crate::MonotonicTime).
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`validate`](Self::validate).
    pub fn build(&self) -> Result<FixedWindowCounter, ConfigError> {
        FixedWindowCounter::from_config(self)
    }
}

/// Settings for a [`LeakyBucket`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LeakyBucketConfig {
    /// Departures per second.
    pub rate: Uint,
    /// Callers allowed to wait for a departure slot at once.
    pub capacity: usize,
}

impl Default for LeakyBucketConfig {
    fn default() -> Self {
        LeakyBucketConfig {
            rate: 1,
            capacity: 1,
        }
    }
}

impl LeakyBucketConfig {
    /// Checks that the limits describe a usable bucket.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ZeroRate` - `rate` is zero
    /// * `ConfigError::RateTooHigh` - `rate` would make the departure gap zero
    /// * `ConfigError::ZeroCapacity` - `capacity` is zero
    /// * `ConfigError::CapacityTooLarge` - `capacity` exceeds what the admission gate can hold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate == 0 {
            return Err(ConfigError::ZeroRate);
        }
        if self.rate > NANOS_PER_SECOND {
            return Err(ConfigError::RateTooHigh { rate: self.rate });
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > Semaphore::MAX_PERMITS {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: Semaphore::MAX_PERMITS,
            });
        }
        Ok(())
    }

    /// Builds a bucket on a fresh [`MonotonicTime`](crate::MonotonicTime).
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`validate`](Self::validate).
    pub fn build(&self) -> Result<LeakyBucket, ConfigError> {
        LeakyBucket::from_config(self)
    }
}
