//! Integer aliases shared by the clock and the limiters.

/// Alias for the unsigned integer type used for permits and capacities.
///
/// Counters saturate rather than wrap, so a misbehaving caller requesting
/// [`Uint::MAX`] permits is rejected instead of resetting the window.
pub type Uint = u64;

/// Nanoseconds since the origin of a [`TimeSource`](crate::TimeSource).
///
/// A `u64` at nanosecond resolution covers roughly 584 years, so a single
/// process never observes it overflowing.
pub type Nanos = u64;

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: Nanos = 1_000_000_000;
