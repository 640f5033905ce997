//! Curve table storage and presentation

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

use crate::error::TableError;

/// Ordered delay table, one tick count per brightness level
///
/// Index 0 is the dimmest level. Entries are strictly decreasing; every
/// constructor checks this or produces it by construction.
///
/// N is the maximum number of levels the table can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveTable<const N: usize> {
    ticks: Vec<u32, N>,
}

impl<const N: usize> CurveTable<N> {
    /// Wrap entries produced by the generator
    pub(crate) const fn from_generated(ticks: Vec<u32, N>) -> Self {
        Self { ticks }
    }

    /// Validate an externally supplied table
    ///
    /// Requires at least two entries, at most `N`, strictly decreasing.
    pub fn try_from_slice(ticks: &[u32]) -> Result<Self, TableError> {
        if ticks.len() > N {
            return Err(TableError::CapacityExceeded { capacity: N });
        }
        check_strictly_decreasing(ticks)?;
        let ticks = Vec::from_slice(ticks)
            .map_err(|()| TableError::CapacityExceeded { capacity: N })?;
        Ok(Self { ticks })
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ticks
    }

    /// Number of brightness levels
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Entry at a 0-based index
    pub fn get(&self, index: usize) -> Option<u32> {
        self.ticks.get(index).copied()
    }

    /// Longest delay, at the dimmest level
    pub fn first(&self) -> Option<u32> {
        self.ticks.first().copied()
    }

    /// Shortest delay, at the brightest level
    pub fn last(&self) -> Option<u32> {
        self.ticks.last().copied()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, u32> {
        self.ticks.iter()
    }

    /// Delay for a 1-based brightness level
    ///
    /// Levels outside `1..=len` are clamped, so level 0 reads the dimmest
    /// entry instead of indexing before the table.
    pub fn delay_for_level(&self, level: usize) -> u32 {
        let level = level.clamp(1, self.ticks.len());
        self.ticks[level - 1]
    }

    /// Convert every entry from one timer frequency to another
    ///
    /// Uses integer math (`tick * to_hz / from_hz`, rounded down), matching
    /// what the firmware does on the fly. Fails if two neighbours collapse
    /// into the same value.
    #[allow(clippy::cast_possible_truncation)]
    pub fn rescaled(&self, from_hz: u32, to_hz: u32) -> Result<Self, TableError> {
        if from_hz == 0 || to_hz == 0 {
            return Err(TableError::ZeroFrequency);
        }

        let mut ticks: Vec<u32, N> = Vec::new();
        for (index, &tick) in self.ticks.iter().enumerate() {
            let scaled = u64::from(tick) * u64::from(to_hz) / u64::from(from_hz);
            if scaled > u64::from(u32::MAX) {
                return Err(TableError::RescaleOverflow { index });
            }
            ticks
                .push(scaled as u32)
                .map_err(|_| TableError::CapacityExceeded { capacity: N })?;
        }
        check_strictly_decreasing(&ticks)?;

        Ok(Self { ticks })
    }
}

fn check_strictly_decreasing(ticks: &[u32]) -> Result<(), TableError> {
    if ticks.len() < 2 {
        return Err(TableError::TooShort(ticks.len()));
    }
    for (offset, pair) in ticks.windows(2).enumerate() {
        if pair[1] >= pair[0] {
            return Err(TableError::NotStrictlyDecreasing { index: offset + 1 });
        }
    }
    Ok(())
}

impl<const N: usize> TryFrom<&[u32]> for CurveTable<N> {
    type Error = TableError;

    fn try_from(ticks: &[u32]) -> Result<Self, Self::Error> {
        Self::try_from_slice(ticks)
    }
}

impl<const N: usize> AsRef<[u32]> for CurveTable<N> {
    fn as_ref(&self) -> &[u32] {
        self.as_slice()
    }
}

impl<'a, const N: usize> IntoIterator for &'a CurveTable<N> {
    type Item = &'a u32;
    type IntoIter = core::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.ticks.iter()
    }
}

/// Comma-separated entries without spaces, ready to paste into firmware
impl<const N: usize> fmt::Display for CurveTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tick) in self.ticks.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{tick}")?;
        }
        Ok(())
    }
}

/// Parse the comma-separated form; whitespace around entries is ignored
impl<const N: usize> FromStr for CurveTable<N> {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ticks: Vec<u32, N> = Vec::new();
        for (index, entry) in s.split(',').enumerate() {
            let tick = entry
                .trim()
                .parse::<u32>()
                .map_err(|_| TableError::InvalidEntry { index })?;
            ticks
                .push(tick)
                .map_err(|_| TableError::CapacityExceeded { capacity: N })?;
        }
        check_strictly_decreasing(&ticks)?;

        Ok(Self { ticks })
    }
}

#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for CurveTable<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ticks.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, const N: usize> serde::Deserialize<'de> for CurveTable<N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ticks = <Vec<u32, N> as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from_slice(&ticks).map_err(serde::de::Error::custom)
    }
}
