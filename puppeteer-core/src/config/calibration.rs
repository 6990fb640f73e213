//! Servo calibration data
//!
//! Raw PWM counts (out of 4096) for the end stops of each mechanism. The
//! values depend on the particular mechanism, the servos used and how the
//! horns sit on the shafts, so they are measured per build.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// End stops of one eyelid servo
///
/// `closed` may be above or below `open` depending on how the servo is
/// mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EyelidCalibration {
    /// PWM channel
    pub channel: u8,
    /// Raw count with the lid shut (0%)
    pub closed: i32,
    /// Raw count with the lid fully open (100%)
    pub open: i32,
}

impl EyelidCalibration {
    /// Create an eyelid calibration
    pub const fn new(channel: u8, closed: i32, open: i32) -> Self {
        Self {
            channel,
            closed,
            open,
        }
    }
}

/// Calibration of one eyeball axis
///
/// Offsets are relative to `mid` and may be negative. On the horizontal
/// axis `low` is full left and `high` full right; on the vertical axis
/// `low` is full down and `high` full up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisCalibration {
    /// PWM channel
    pub channel: u8,
    /// Raw count with the axis centered
    pub mid: i32,
    /// Offset from `mid` at 0%
    pub low_offset: i32,
    /// Offset from `mid` at 100%
    pub high_offset: i32,
}

impl AxisCalibration {
    /// Create an axis calibration
    pub const fn new(channel: u8, mid: i32, low_offset: i32, high_offset: i32) -> Self {
        Self {
            channel,
            mid,
            low_offset,
            high_offset,
        }
    }

    /// Raw count at 0%
    pub const fn low(&self) -> i32 {
        self.mid.saturating_add(self.low_offset)
    }

    /// Raw count at 100%
    pub const fn high(&self) -> i32 {
        self.mid.saturating_add(self.high_offset)
    }
}

/// Calibration of the two-axis eyeball mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EyeballCalibration {
    /// Horizontal axis (low = left, high = right)
    pub x: AxisCalibration,
    /// Vertical axis (low = down, high = up)
    pub y: AxisCalibration,
}

/// Calibration of a complete head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeadCalibration {
    pub eyeball: EyeballCalibration,
    pub left_upper: EyelidCalibration,
    pub left_lower: EyelidCalibration,
    pub right_upper: EyelidCalibration,
    pub right_lower: EyelidCalibration,
}

/// Channel wiring shared by the built-in presets
pub mod channel {
    pub const EYEBALL_X: u8 = 0;
    pub const EYEBALL_Y: u8 = 1;
    pub const LEFT_UPPER: u8 = 2;
    pub const LEFT_LOWER: u8 = 3;
    pub const RIGHT_UPPER: u8 = 4;
    pub const RIGHT_LOWER: u8 = 5;
}

impl HeadCalibration {
    /// Bob's mechanism
    pub const BOBG: Self = Self {
        eyeball: EyeballCalibration {
            x: AxisCalibration::new(channel::EYEBALL_X, 373, 96, -82),
            y: AxisCalibration::new(channel::EYEBALL_Y, 440, -108, 69),
        },
        left_upper: EyelidCalibration::new(channel::LEFT_UPPER, 500, 281),
        left_lower: EyelidCalibration::new(channel::LEFT_LOWER, 281, 538),
        right_upper: EyelidCalibration::new(channel::RIGHT_UPPER, 255, 510),
        right_lower: EyelidCalibration::new(channel::RIGHT_LOWER, 536, 266),
    };

    /// Jim's mechanism
    pub const JIMS: Self = Self {
        eyeball: EyeballCalibration {
            x: AxisCalibration::new(channel::EYEBALL_X, 400, 141, -121),
            y: AxisCalibration::new(channel::EYEBALL_Y, 407, -82, 98),
        },
        left_upper: EyelidCalibration::new(channel::LEFT_UPPER, 486, 287),
        left_lower: EyelidCalibration::new(channel::LEFT_LOWER, 258, 450),
        right_upper: EyelidCalibration::new(channel::RIGHT_UPPER, 261, 469),
        right_lower: EyelidCalibration::new(channel::RIGHT_LOWER, 509, 256),
    };

    /// Look up a built-in preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "bobg" => Some(Self::BOBG),
            "jims" => Some(Self::JIMS),
            _ => None,
        }
    }

    /// Check that no two servos share a PWM channel
    pub fn channels_are_distinct(&self) -> bool {
        let channels = [
            self.eyeball.x.channel,
            self.eyeball.y.channel,
            self.left_upper.channel,
            self.left_lower.channel,
            self.right_upper.channel,
            self.right_lower.channel,
        ];
        channels
            .iter()
            .enumerate()
            .all(|(i, c)| !channels[i + 1..].contains(c))
    }
}

impl Default for HeadCalibration {
    fn default() -> Self {
        Self::BOBG
    }
}
