//! Two-axis eyeball mechanism
//!
//! Both eyes share one horizontal and one vertical servo. Horizontal 0% is
//! full left and 100% full right; vertical 0% is full down and 100% full up.

use crate::config::EyeballCalibration;
use crate::motion::{Actuator, MotionProfile};
use crate::traits::{PointOfInterest, PwmOutput, TOF_GRID_SIZE};

use super::{Limb, Percent};

/// The eyeball X/Y servo pair
#[derive(Debug, Clone)]
pub struct Eyeball {
    x: Actuator,
    y: Actuator,
    calibration: EyeballCalibration,
}

impl Eyeball {
    /// Create an eyeball resting at the center of both axes
    pub fn new(calibration: EyeballCalibration, profile: MotionProfile, tick_ms: u32) -> Self {
        Self {
            x: Actuator::new(calibration.x.channel, calibration.x.mid, profile, tick_ms),
            y: Actuator::new(calibration.y.channel, calibration.y.mid, profile, tick_ms),
            calibration,
        }
    }

    /// Move the horizontal axis
    ///
    /// # Returns
    /// Estimated duration of the move in milliseconds
    pub fn position_x(&mut self, position: Percent, speed: u16, now_ms: u64) -> u32 {
        let axis = &self.calibration.x;
        self.x
            .start_move(position.map(axis.low(), axis.high()), speed, now_ms)
    }

    /// Move the vertical axis
    ///
    /// # Returns
    /// Estimated duration of the move in milliseconds
    pub fn position_y(&mut self, position: Percent, speed: u16, now_ms: u64) -> u32 {
        let axis = &self.calibration.y;
        self.y
            .start_move(position.map(axis.low(), axis.high()), speed, now_ms)
    }

    /// Center both axes
    ///
    /// # Returns
    /// The longer of the two estimates
    pub fn look_center(&mut self, speed: u16, now_ms: u64) -> u32 {
        let x = self.position_x(Percent::HALF, speed, now_ms);
        let y = self.position_y(Percent::HALF, speed, now_ms);
        x.max(y)
    }

    /// Aim at a range sensor point of interest
    ///
    /// Grid columns run left to right and rows top to bottom. A reading
    /// with no focus leaves the eyes where they are.
    ///
    /// # Returns
    /// The longer of the two estimates, or 0 when nothing is in range
    pub fn look_at(&mut self, point: &PointOfInterest, speed: u16, now_ms: u64) -> u32 {
        let Some((column, row)) = point.focus else {
            return 0;
        };

        let x = grid_to_percent(column);
        let y = Percent::new(100 - grid_to_percent(row).value() as i32);
        trace!(
            "look at zone ({}, {}) {} mm -> x {}% y {}%",
            column,
            row,
            point.distance_mm,
            x.value(),
            y.value()
        );

        let x = self.position_x(x, speed, now_ms);
        let y = self.position_y(y, speed, now_ms);
        x.max(y)
    }

    /// Axis calibration
    pub fn calibration(&self) -> &EyeballCalibration {
        &self.calibration
    }

    /// Horizontal actuator
    pub fn x(&self) -> &Actuator {
        &self.x
    }

    /// Vertical actuator
    pub fn y(&self) -> &Actuator {
        &self.y
    }
}

/// Spread grid zones evenly over 0-100%
fn grid_to_percent(zone: u8) -> Percent {
    let last = (TOF_GRID_SIZE - 1) as i32;
    Percent::new((zone as i32).min(last) * 100 / last)
}

impl Limb for Eyeball {
    fn initialize<P: PwmOutput + ?Sized>(&mut self, pwm: &mut P) {
        self.x.initialize(pwm);
        self.y.initialize(pwm);
    }

    fn advance<P: PwmOutput + ?Sized>(&mut self, now_ms: u64, pwm: &mut P) {
        self.x.advance(now_ms, pwm);
        self.y.advance(now_ms, pwm);
    }

    fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}
