//! Rate limiting algorithm implementations.
//!
//! Both limiters are thread-safe and meant to be shared, typically behind an
//! [`Arc`](std::sync::Arc), by every thread that needs an admission decision.
//!
//! # Available Algorithms
//!
//! - **[`FixedWindowCounter`]** - Counts permits per fixed window, resetting at window expiry
//! - **[`LeakyBucket`]** - Paces callers onto a constant-rate departure schedule
//!
//! # Algorithm Comparison
//!
//! | Algorithm | Blocks caller | Burst Handling | Use Case |
//! |-----------|---------------|----------------|----------|
//! | Fixed Window | Never | Boundary bursts up to 2x | Cheap request quotas |
//! | Leaky Bucket | Until its slot | Smoothed to `rate` | Steady outbound traffic |
//!
//! # Thread Safety
//!
//! Each limiter keeps its mutable state behind a single lock held only for
//! the bookkeeping, never across the leaky bucket's pacing sleep.

pub mod fixed_window_counter;
pub use fixed_window_counter::FixedWindowCounter;

pub mod leaky_bucket;
pub use leaky_bucket::LeakyBucket;
