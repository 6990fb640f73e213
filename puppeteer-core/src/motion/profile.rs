//! Interpolation regimes
//!
//! A regime turns the remaining distance and a speed into the size of the
//! next step, and into an up-front estimate of how long the whole move takes.
//! Distances are in hundredths of a raw count (`_x100`) so the decay regime
//! can creep below one count per tick without floating point.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-point scale of actuator positions
pub const POSITION_SCALE: i32 = 100;

/// Distance (raw counts) under which an actuator snaps onto its destination
pub const ARRIVAL_THRESHOLD: i32 = 2;

/// Slowest standard speed
pub const MOVE_SPEED_SLOW: u16 = 1;

/// Standard speed for blinks and quick glances
pub const MOVE_SPEED_FAST: u16 = 10;

/// Fastest standard speed
///
/// Under [`MotionProfile::Decay`] it covers the whole remaining distance in
/// one tick. Under [`MotionProfile::Linear`] it is 100 raw counts per tick,
/// so longer moves still take several ticks.
pub const MOVE_SPEED_IMMEDIATE: u16 = 100;

/// Smallest fraction of the remaining distance a decay step covers (percent)
const DECAY_MIN_PERCENT: u32 = 10;

/// Decay percentage gained per unit of speed
const DECAY_PERCENT_PER_SPEED: u32 = 5;

/// Travel direction, fixed when a move starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Raw value grows toward the destination
    #[default]
    Increasing,
    /// Raw value shrinks toward the destination
    Decreasing,
}

impl Direction {
    /// Direction of travel from `from` to `to`
    pub fn between(from: i32, to: i32) -> Self {
        if to >= from {
            Direction::Increasing
        } else {
            Direction::Decreasing
        }
    }

    /// +1 or -1
    pub fn sign(self) -> i32 {
        match self {
            Direction::Increasing => 1,
            Direction::Decreasing => -1,
        }
    }
}

/// Motion interpolation regime
///
/// Selected once per actuator at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionProfile {
    /// Constant step of `speed` raw counts per tick
    Linear,
    /// Each tick covers a fixed fraction of the remaining distance,
    /// so servos ease into their destination
    #[default]
    Decay,
}

impl MotionProfile {
    /// Estimate the duration of a move in milliseconds
    ///
    /// # Arguments
    /// - `distance_x100`: Distance to travel in hundredths of a raw count
    /// - `speed`: Move speed (0 is treated as 1)
    /// - `tick_ms`: Minimum interval between steps
    pub fn estimate_ms(self, distance_x100: u32, speed: u16, tick_ms: u32) -> u32 {
        let scale = POSITION_SCALE as u32;
        let floor_d = distance_x100 / scale;

        match self {
            MotionProfile::Linear => {
                let ceil_d = distance_x100.div_ceil(scale);
                let ticks = ceil_d / effective_speed(speed) + 1;
                ticks.saturating_mul(tick_ms).saturating_add(floor_d)
            }
            MotionProfile::Decay => {
                let ticks = floor_d.saturating_mul(100) / decay_percent(speed) + 1;
                floor_d.saturating_add(ticks.saturating_mul(tick_ms) / 4)
            }
        }
    }

    /// Size of the next step in hundredths of a raw count
    ///
    /// Never larger than `remaining_x100`, and at least one unit while any
    /// distance remains.
    pub fn step_x100(self, remaining_x100: u32, speed: u16) -> u32 {
        let step = match self {
            MotionProfile::Linear => effective_speed(speed).saturating_mul(POSITION_SCALE as u32),
            MotionProfile::Decay => (remaining_x100 / 100)
                .saturating_mul(decay_percent(speed))
                .saturating_add((remaining_x100 % 100) * decay_percent(speed) / 100)
                .max(1),
        };
        step.min(remaining_x100)
    }

    /// Config file spelling
    pub fn name(self) -> &'static str {
        match self {
            MotionProfile::Linear => "linear",
            MotionProfile::Decay => "decay",
        }
    }

    /// Parse the config file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(MotionProfile::Linear),
            "decay" => Some(MotionProfile::Decay),
            _ => None,
        }
    }
}

/// Fraction of the remaining distance covered per decay step, in percent
///
/// `speed / 20` clamped to `0.1..=1.0`.
pub fn decay_percent(speed: u16) -> u32 {
    (speed as u32 * DECAY_PERCENT_PER_SPEED).clamp(DECAY_MIN_PERCENT, 100)
}

fn effective_speed(speed: u16) -> u32 {
    (speed as u32).max(1)
}
