//! Thread-safe admission control for Rust applications.
//!
//! This library decides, for each incoming request, whether it may proceed
//! under a configured throughput limit. Two algorithms are provided, both
//! built on a monotonic [`Clock`] and a pluggable [`TimeSource`].
//!
//! # Quick Start
//!
//! ```rust
//! use rate_gate::FixedWindowCounter;
//!
//! // Allow 100 requests per second
//! let limiter = FixedWindowCounter::new(100);
//!
//! if limiter.try_acquire() {
//!     println!("Request allowed");
//! } else {
//!     println!("Request denied, try again later");
//! }
//! ```
//!
//! # Available Rate Limiting Algorithms
//!
//! ## [Fixed Window Counter](rate_limiters::FixedWindowCounter)
//! Grants up to `capacity` permits per one-second window, never blocking:
//! ```rust
//! # use rate_gate::FixedWindowCounter;
//! let limiter = FixedWindowCounter::new(5);
//! assert!(limiter.try_acquire_permits(5));
//! assert!(!limiter.try_acquire());
//! ```
//!
//! ## [Leaky Bucket](rate_limiters::LeakyBucket)
//! Spaces admitted callers `1 / rate` seconds apart, sleeping each one until
//! its departure slot, and turns away callers once `capacity` are waiting:
//! ```rust,no_run
//! # use rate_gate::LeakyBucket;
//! let limiter = LeakyBucket::new(2, 2); // 2 per second, 2 waiting at most
//! assert!(limiter.try_acquire()); // returns after ~500ms
//! ```
//!
//! # Core Concepts
//!
//! ## Time
//! Limiters read time through a [`TimeSource`]. [`MonotonicTime`] wraps
//! [`std::time::Instant`]; [`ManualTime`] only moves when told to and makes
//! timing behavior reproducible in tests.
//!
//! ## Rejections
//! `try_acquire` returns `false` for a refused request. That is the routine
//! overload outcome, not an error. The `*_verbose` variants return a
//! [`Rejection`] naming the reason. Invalid limits are refused at
//! construction with a [`ConfigError`].
//!
//! ## Interruption
//! A leaky bucket wait can be cut short with an [`Interrupt`]; the caller is
//! rejected and its queue slot freed.
//!
//! ## Logging
//! Decisions are reported through [`tracing`] at `trace` level; window
//! rollovers, schedule rebases and interrupted waits at `debug` level.

pub mod clock;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod rate_limit;
pub mod rate_limiters;
pub mod time_source;
pub mod types;

pub use clock::{Clock, TimeUnit};
pub use config::{FixedWindowCounterConfig, LeakyBucketConfig};
pub use error::{AcquireResult, ConfigError, Rejection};
pub use interrupt::Interrupt;
pub use rate_limit::RateLimit;
pub use rate_limiters::{FixedWindowCounter, LeakyBucket};
pub use time_source::{ManualTime, MonotonicTime, TimeSource};
pub use types::{Nanos, Uint};
