//! Range sensor trait
//!
//! A time-of-flight sensor with a zone grid reports the zone holding the
//! nearest object as a point of interest.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zones per side of the sensor grid
pub const TOF_GRID_SIZE: u8 = 8;

/// Nearest object seen by the range sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointOfInterest {
    /// Time of the reading (ms since boot)
    pub detected_at_ms: u64,
    /// Distance to the object in millimetres
    pub distance_mm: i32,
    /// Zone of the object as `(column, row)`, `None` when nothing is in range
    ///
    /// Column 0 is the sensor's left edge, row 0 the top.
    pub focus: Option<(u8, u8)>,
}

impl PointOfInterest {
    /// A reading with nothing in range
    pub const fn unfocused(detected_at_ms: u64) -> Self {
        Self {
            detected_at_ms,
            distance_mm: 0,
            focus: None,
        }
    }
}

/// Source of point-of-interest readings
pub trait PointOfInterestSource {
    /// Take the latest reading
    fn point_of_interest(&mut self) -> PointOfInterest;
}
