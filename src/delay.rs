//! Command word understood by the dimmer coprocessor
//!
//! The coprocessor exposes two 8-bit registers holding a big-endian 16-bit
//! delay. Two values are reserved: `0` keeps the triac on for the whole
//! half-wave and `0xFFFF` keeps it off.

use crate::error::DelayError;

const WORD_FULL_ON: u16 = 0x0000;
const WORD_OFF: u16 = 0xFFFF;

/// What the triac should do on every half-wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayCommand {
    /// Fire immediately, full power
    FullOn,
    /// Never fire
    Off,
    /// Fire this many coprocessor ticks after the zero crossing
    Delay(u16),
}

impl DelayCommand {
    /// Build a command from a curve entry
    ///
    /// Zero ticks means full power.
    pub fn from_ticks(ticks: u32) -> Result<Self, DelayError> {
        match u16::try_from(ticks) {
            Ok(WORD_FULL_ON) => Ok(Self::FullOn),
            Ok(WORD_OFF) | Err(_) => Err(DelayError::OutOfRange(ticks)),
            Ok(word) => Ok(Self::Delay(word)),
        }
    }

    pub const fn from_word(word: u16) -> Self {
        match word {
            WORD_FULL_ON => Self::FullOn,
            WORD_OFF => Self::Off,
            delay => Self::Delay(delay),
        }
    }

    pub const fn to_word(self) -> u16 {
        match self {
            Self::FullOn => WORD_FULL_ON,
            Self::Off => WORD_OFF,
            Self::Delay(delay) => delay,
        }
    }

    /// Register layout: high byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_word().to_be_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self::from_word(u16::from_be_bytes(bytes))
    }
}

impl From<DelayCommand> for u16 {
    fn from(command: DelayCommand) -> Self {
        command.to_word()
    }
}

impl From<u16> for DelayCommand {
    fn from(word: u16) -> Self {
        Self::from_word(word)
    }
}
