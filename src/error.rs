//! Error types
//!
//! All errors are `Copy` and carry only the offending values, so they can be
//! returned from firmware code without allocation.

use thiserror::Error;

/// Calibration parameters that can not produce a valid curve
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    /// At least two levels are needed to span a delay range
    #[error("level count {0} is below the minimum of 2")]
    TooFewLevels(usize),
    /// The table storage is smaller than the requested level count
    #[error("level count {count} exceeds table capacity {capacity}")]
    TooManyLevels { count: usize, capacity: usize },
    #[error("gamma must be a positive finite number, got {0}")]
    InvalidGamma(f64),
    #[error("timer frequency must be a positive finite number, got {0} Hz")]
    InvalidTimerFrequency(f64),
    #[error("delay must be a non-negative finite number, got {0} s")]
    InvalidDelay(f64),
    #[error("fallback step must be at least one tick")]
    ZeroFallbackStep,
    /// A delay does not fit into 32-bit ticks at the given frequency
    #[error("delay of {0} ticks does not fit into 32 bits")]
    TicksOverflow(f64),
    /// The fallback decrement reached zero before the last level
    #[error("no delay left below zero ticks for level index {index}")]
    DelayRangeExhausted { index: usize },
}

/// A curve table supplied from outside the generator is malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table has {0} entries, at least 2 are required")]
    TooShort(usize),
    #[error("table has more entries than its capacity of {capacity}")]
    CapacityExceeded { capacity: usize },
    /// Entry at `index` is not strictly below its predecessor
    #[error("entry {index} is not strictly below the previous entry")]
    NotStrictlyDecreasing { index: usize },
    #[error("entry {index} is not a valid tick count")]
    InvalidEntry { index: usize },
    #[error("timer frequency must be non-zero")]
    ZeroFrequency,
    #[error("rescaled entry {index} does not fit into 32 bits")]
    RescaleOverflow { index: usize },
}

/// Tick count that can not be sent to the dimmer coprocessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DelayError {
    /// `0xFFFF` and above collide with the off marker or overflow the word
    #[error("delay of {0} ticks does not fit into a 16-bit command word")]
    OutOfRange(u32),
}
