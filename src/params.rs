use crate::error::ConfigurationError;

/// Number of brightness levels the dimmer firmware works with
pub const DEFAULT_LEVEL_COUNT: usize = 100;
/// Perceptual correction exponent
pub const DEFAULT_GAMMA: f64 = 2.5;
/// Delay at the brightest level, seconds
pub const DEFAULT_MIN_DELAY: f64 = 0.0;
/// Delay at the dimmest level, seconds (6.5 ms of a 10 ms half-wave)
pub const DEFAULT_MAX_DELAY: f64 = 6.5e-3;
/// Microsecond resolution timer
pub const DEFAULT_TIMER_FREQUENCY_HZ: f64 = 1e6;
/// Decrement applied when the raw curve does not fall below the previous entry
pub const DEFAULT_FALLBACK_STEP: u32 = 20;

/// Input of the curve generator
///
/// Index 0 of the generated curve is the dimmest level and carries
/// `max_delay`, the last index is the brightest one and carries `min_delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationParameters {
    /// Number of discrete brightness steps
    pub level_count: usize,
    /// Perceptual correction exponent
    pub gamma: f64,
    /// Delay after the zero crossing at the brightest level, seconds
    pub min_delay: f64,
    /// Delay after the zero crossing at the dimmest level, seconds
    pub max_delay: f64,
    /// Timer ticks per second
    pub timer_frequency_hz: f64,
    /// Ticks subtracted from the previous entry when the curve is locally flat
    pub fallback_step: u32,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationParameters {
    /// Create parameters with the firmware defaults
    pub const fn new() -> Self {
        Self {
            level_count: DEFAULT_LEVEL_COUNT,
            gamma: DEFAULT_GAMMA,
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            timer_frequency_hz: DEFAULT_TIMER_FREQUENCY_HZ,
            fallback_step: DEFAULT_FALLBACK_STEP,
        }
    }

    pub const fn with_level_count(mut self, level_count: usize) -> Self {
        self.level_count = level_count;
        self
    }

    pub const fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set both ends of the delay range, in seconds
    pub const fn with_delay_range(mut self, min_delay: f64, max_delay: f64) -> Self {
        self.min_delay = min_delay;
        self.max_delay = max_delay;
        self
    }

    pub const fn with_timer_frequency(mut self, timer_frequency_hz: f64) -> Self {
        self.timer_frequency_hz = timer_frequency_hz;
        self
    }

    pub const fn with_fallback_step(mut self, fallback_step: u32) -> Self {
        self.fallback_step = fallback_step;
        self
    }

    /// Check the parameters against a table of `capacity` entries
    ///
    /// An inverted range (`max_delay < min_delay`) is accepted; the
    /// generator resolves it through the fallback step.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigurationError> {
        if self.level_count < 2 {
            return Err(ConfigurationError::TooFewLevels(self.level_count));
        }
        if self.level_count > capacity {
            return Err(ConfigurationError::TooManyLevels {
                count: self.level_count,
                capacity,
            });
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(ConfigurationError::InvalidGamma(self.gamma));
        }
        if !self.timer_frequency_hz.is_finite() || self.timer_frequency_hz <= 0.0 {
            return Err(ConfigurationError::InvalidTimerFrequency(
                self.timer_frequency_hz,
            ));
        }
        for delay in [self.min_delay, self.max_delay] {
            if !delay.is_finite() || delay < 0.0 {
                return Err(ConfigurationError::InvalidDelay(delay));
            }
        }
        if self.fallback_step == 0 {
            return Err(ConfigurationError::ZeroFallbackStep);
        }

        let longest = libm::round(self.min_delay.max(self.max_delay) * self.timer_frequency_hz);
        if longest > f64::from(u32::MAX) {
            return Err(ConfigurationError::TicksOverflow(longest));
        }

        Ok(())
    }

    /// Delay at the dimmest level in ticks, before rounding
    pub fn max_ticks(&self) -> f64 {
        self.max_delay * self.timer_frequency_hz
    }

    /// Delay at the brightest level in ticks, before rounding
    pub fn min_ticks(&self) -> f64 {
        self.min_delay * self.timer_frequency_hz
    }
}
