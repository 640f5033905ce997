//! Dimmer state driven by a curve table
//!
//! Brightness changes are ramped one level per tick, so a call rate of
//! 100 Hz moves through a 100-level curve in one second. Used for:
//! - Soft power on and off
//! - Brightness changes from buttons or remote commands
//! - A temporary minimum brightness (night light) that expires on its own

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::delay::DelayCommand;
use crate::error::DelayError;
use crate::table::CurveTable;

/// Lowest addressable brightness level
const MIN_LEVEL: usize = 1;

/// Initial dimmer state
#[derive(Debug, Clone, Copy)]
pub struct DimmerConfig {
    /// Target brightness level, 1-based
    pub brightness: usize,
    /// Whether the dimmer starts switched on
    pub on: bool,
}

/// Phase-control dimmer walking a delay curve
#[derive(Debug, Clone)]
pub struct Dimmer<'a, const N: usize> {
    curve: &'a CurveTable<N>,
    on: bool,
    /// Requested brightness level
    brightness: usize,
    /// Level currently driven, moves towards the target by one per tick
    current: usize,
    min_brightness: usize,
    min_brightness_until: Option<Instant>,
    /// Last command returned from `tick`
    last_command: Option<DelayCommand>,
}

impl<'a, const N: usize> Dimmer<'a, N> {
    /// Create a dimmer over `curve`
    ///
    /// Fails if the longest delay of the curve can not be expressed as a
    /// coprocessor command.
    pub fn new(curve: &'a CurveTable<N>, config: &DimmerConfig) -> Result<Self, DelayError> {
        if let Some(longest) = curve.first() {
            DelayCommand::from_ticks(longest)?;
        }

        Ok(Self {
            curve,
            on: config.on,
            brightness: config.brightness.clamp(MIN_LEVEL, curve.len()),
            current: MIN_LEVEL,
            min_brightness: MIN_LEVEL,
            min_brightness_until: None,
            last_command: None,
        })
    }

    /// Number of brightness levels
    pub fn levels(&self) -> usize {
        self.curve.len()
    }

    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Requested brightness level
    pub const fn brightness(&self) -> usize {
        self.brightness
    }

    /// Level currently driven
    pub const fn current_level(&self) -> usize {
        self.current
    }

    /// Last emitted command, `None` before the first tick
    pub const fn command(&self) -> Option<DelayCommand> {
        self.last_command
    }

    /// Set the target brightness, clamped to the curve levels
    ///
    /// Returns true if the target changed.
    pub fn set_brightness(&mut self, level: usize) -> bool {
        let level = level.clamp(MIN_LEVEL, self.levels());
        if self.brightness == level {
            return false;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[Dimmer.set_brightness] {:?} -> {:?}",
            self.brightness, level
        );
        self.brightness = level;
        true
    }

    /// Move the target relative to the level currently driven
    pub fn change_brightness(&mut self, delta: isize) -> bool {
        self.set_brightness(self.current.saturating_add_signed(delta))
    }

    /// Returns true if the power state changed
    pub fn set_on(&mut self, on: bool) -> bool {
        if self.on == on {
            return false;
        }
        self.on = on;
        true
    }

    pub fn toggle(&mut self) -> bool {
        self.set_on(!self.on)
    }

    /// Keep at least `level` for `duration`, even while switched off
    ///
    /// A zero duration removes the floor. The floor is kept while
    /// `now <= now_at_call + duration`.
    pub fn set_min_brightness_for(&mut self, level: usize, duration: Duration, now: Instant) {
        if duration.as_ticks() == 0 {
            self.min_brightness = MIN_LEVEL;
            self.min_brightness_until = None;
            return;
        }
        self.min_brightness = level.clamp(MIN_LEVEL, self.levels());
        // Saturates, a hold past the end of time never expires
        self.min_brightness_until = Some(now.checked_add(duration).unwrap_or(Instant::MAX));
    }

    /// Level the ramp is heading to
    pub fn target_level(&self) -> usize {
        if self.on {
            self.min_brightness.max(self.brightness)
        } else {
            self.min_brightness
        }
    }

    /// Advance the ramp by one level
    ///
    /// Returns the command to send when it differs from the previous one.
    pub fn tick(&mut self, now: Instant) -> Option<DelayCommand> {
        if let Some(until) = self.min_brightness_until {
            if now > until {
                self.min_brightness_until = None;
                self.min_brightness = MIN_LEVEL;
            }
        }

        let target = self.target_level();
        if self.current < target {
            self.current += 1;
        } else if self.current > target {
            self.current -= 1;
        }

        let driven = self.on || self.min_brightness_until.is_some() || self.current != target;
        let command = if driven {
            // The longest delay is checked in `new`, so every entry fits
            let command = DelayCommand::from_ticks(self.curve.delay_for_level(self.current));
            debug_assert!(command.is_ok(), "curve entry does not fit a command word");
            command.unwrap_or(DelayCommand::Off)
        } else {
            DelayCommand::Off
        };

        if self.last_command == Some(command) {
            return None;
        }
        self.last_command = Some(command);
        Some(command)
    }
}
