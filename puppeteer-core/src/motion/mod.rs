//! Servo motion
//!
//! Time-bounded incremental moves toward a target position, one step per
//! tick, under a selectable interpolation regime.

pub mod actuator;
pub mod profile;

pub use actuator::{Actuator, StepOutcome};
pub use profile::{
    decay_percent, Direction, MotionProfile, ARRIVAL_THRESHOLD, MOVE_SPEED_FAST,
    MOVE_SPEED_IMMEDIATE, MOVE_SPEED_SLOW, POSITION_SCALE,
};
