//! Single eyelid
//!
//! 0% is shut, 100% fully open.

use crate::config::EyelidCalibration;
use crate::motion::{Actuator, MotionProfile};
use crate::traits::PwmOutput;

use super::{Limb, Percent};

/// One eyelid servo with its end stops
#[derive(Debug, Clone)]
pub struct Eyelid {
    actuator: Actuator,
    calibration: EyelidCalibration,
}

impl Eyelid {
    /// Create an eyelid resting shut
    pub fn new(calibration: EyelidCalibration, profile: MotionProfile, tick_ms: u32) -> Self {
        Self {
            actuator: Actuator::new(calibration.channel, calibration.closed, profile, tick_ms),
            calibration,
        }
    }

    /// Move to `openness`
    ///
    /// # Returns
    /// Estimated duration of the move in milliseconds
    pub fn set_openness(&mut self, openness: Percent, speed: u16, now_ms: u64) -> u32 {
        let target = openness.map(self.calibration.closed, self.calibration.open);
        self.actuator.start_move(target, speed, now_ms)
    }

    /// End stops and channel
    pub fn calibration(&self) -> &EyelidCalibration {
        &self.calibration
    }

    /// Underlying servo actuator
    pub fn actuator(&self) -> &Actuator {
        &self.actuator
    }
}

impl Limb for Eyelid {
    fn initialize<P: PwmOutput + ?Sized>(&mut self, pwm: &mut P) {
        self.actuator.initialize(pwm);
    }

    fn advance<P: PwmOutput + ?Sized>(&mut self, now_ms: u64, pwm: &mut P) {
        self.actuator.advance(now_ms, pwm);
    }

    fn is_at_rest(&self) -> bool {
        self.actuator.is_at_rest()
    }
}
