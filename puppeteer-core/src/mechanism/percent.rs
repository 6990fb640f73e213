//! Percentage domain of limb positions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position between 0 and 100 percent
///
/// Out-of-range inputs are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const HALF: Self = Self(50);
    pub const FULL: Self = Self(100);

    /// Create a percentage, clamping to `0..=100`
    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Percentage value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Map onto the range `at_zero..=at_full`
    ///
    /// Either end may be the larger one. Integer division truncates toward
    /// `at_zero`.
    pub fn map(self, at_zero: i32, at_full: i32) -> i32 {
        let span = at_full as i64 - at_zero as i64;
        // Lies between the two ends, so it fits back into i32
        (at_zero as i64 + span * self.0 as i64 / 100) as i32
    }
}

impl From<u8> for Percent {
    fn from(value: u8) -> Self {
        Self::new(value as i32)
    }
}

impl From<i16> for Percent {
    fn from(value: i16) -> Self {
        Self::new(value as i32)
    }
}
