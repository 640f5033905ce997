#![no_std]

pub mod delay;
pub mod dimmer;
pub mod error;
pub mod generator;
pub mod params;
pub mod table;

pub use delay::DelayCommand;
pub use dimmer::{Dimmer, DimmerConfig};
pub use error::{ConfigurationError, DelayError, TableError};
pub use generator::{generate, perceptual_position};
pub use params::CalibrationParameters;
pub use table::CurveTable;

pub use embassy_time::{Duration, Instant};

/// Table sized for the firmware's 100 brightness levels
pub type DimmerCurve = CurveTable<{ params::DEFAULT_LEVEL_COUNT }>;
