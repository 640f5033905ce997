//! Brightness-to-delay curve generation
//!
//! Maps linear brightness steps onto a gamma-corrected delay curve. Equal
//! steps in firing delay do not look like equal steps in brightness, so the
//! step index is raised to `gamma` before it is mapped onto the delay range.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use heapless::Vec;

use crate::error::ConfigurationError;
use crate::params::CalibrationParameters;
use crate::table::CurveTable;

/// Generate a strictly decreasing delay table
///
/// `N` is the table capacity; `params.level_count` must not exceed it.
/// Generation either succeeds for every level or returns an error, there are
/// no partial tables.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn generate<const N: usize>(
    params: &CalibrationParameters,
) -> Result<CurveTable<N>, ConfigurationError> {
    params.validate(N)?;

    let start = params.max_ticks();
    let end = params.min_ticks();
    let top = (params.level_count - 1) as f64;

    let mut ticks: Vec<u32, N> = Vec::new();
    let mut previous: Option<u32> = None;

    for index in 0..params.level_count {
        let corrected = perceptual_position(index as f64, top, params.gamma);
        // Non-negative and below u32::MAX, both checked by `validate`
        let raw = libm::round((end - start) * corrected + start) as u32;

        let accepted = match previous {
            Some(prev) if raw >= prev => {
                let forced = step_below(prev, params.fallback_step)
                    .ok_or(ConfigurationError::DelayRangeExhausted { index })?;
                #[cfg(feature = "esp32-log")]
                println!(
                    "[generate] level {:?}: raw {:?} >= {:?}, forced to {:?}",
                    index, raw, prev, forced
                );
                forced
            }
            _ => raw,
        };

        ticks
            .push(accepted)
            .map_err(|_| ConfigurationError::TooManyLevels {
                count: params.level_count,
                capacity: N,
            })?;
        previous = Some(accepted);
    }

    Ok(CurveTable::from_generated(ticks))
}

/// Gamma-corrected position of `index` on a `0..=top` scale, in `0.0..=1.0`
///
/// The ratio is taken before the power so large exponents stay finite.
pub fn perceptual_position(index: f64, top: f64, gamma: f64) -> f64 {
    libm::pow(index / top, gamma)
}

/// Largest value the fallback may use below `prev`
///
/// Clamps at zero when `prev` is smaller than `step`. Returns `None` when
/// `prev` is already zero.
const fn step_below(prev: u32, step: u32) -> Option<u32> {
    if prev == 0 {
        return None;
    }
    Some(prev.saturating_sub(step))
}

impl<const N: usize> CurveTable<N> {
    /// Generate a table from calibration parameters
    ///
    /// Shorthand for [`generate`].
    pub fn generate(params: &CalibrationParameters) -> Result<Self, ConfigurationError> {
        generate(params)
    }
}
