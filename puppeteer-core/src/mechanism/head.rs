//! Head assembly
//!
//! Owns the eyeball mechanism and the four eyelids, and exposes the
//! compound moves scenes are built from. Every move returns an estimated
//! duration; compound moves return the longest estimate of their members.

use crate::config::HeadCalibration;
use crate::motion::MotionProfile;
use crate::traits::{PointOfInterest, PwmOutput};

use super::{Eyeball, Eyelid, Limb, Percent};

/// Which eye
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// The complete eye mechanism
#[derive(Debug, Clone)]
pub struct Head {
    eyeballs: Eyeball,
    left_upper: Eyelid,
    left_lower: Eyelid,
    right_upper: Eyelid,
    right_lower: Eyelid,
}

impl Head {
    /// Create a head with eyes centered and lids shut
    pub fn new(calibration: &HeadCalibration, profile: MotionProfile, tick_ms: u32) -> Self {
        Self {
            eyeballs: Eyeball::new(calibration.eyeball, profile, tick_ms),
            left_upper: Eyelid::new(calibration.left_upper, profile, tick_ms),
            left_lower: Eyelid::new(calibration.left_lower, profile, tick_ms),
            right_upper: Eyelid::new(calibration.right_upper, profile, tick_ms),
            right_lower: Eyelid::new(calibration.right_lower, profile, tick_ms),
        }
    }

    /// Move all four eyelids
    pub fn set_eyes_openness(&mut self, openness: Percent, speed: u16, now_ms: u64) -> u32 {
        let left = self.set_side_openness(Side::Left, openness, speed, now_ms);
        let right = self.set_side_openness(Side::Right, openness, speed, now_ms);
        left.max(right)
    }

    /// Move both eyelids of one eye
    pub fn set_side_openness(
        &mut self,
        side: Side,
        openness: Percent,
        speed: u16,
        now_ms: u64,
    ) -> u32 {
        let (upper, lower) = match side {
            Side::Left => (&mut self.left_upper, &mut self.left_lower),
            Side::Right => (&mut self.right_upper, &mut self.right_lower),
        };
        let upper = upper.set_openness(openness, speed, now_ms);
        let lower = lower.set_openness(openness, speed, now_ms);
        upper.max(lower)
    }

    /// Center the eyes
    pub fn look_center(&mut self, speed: u16, now_ms: u64) -> u32 {
        self.eyeballs.look_center(speed, now_ms)
    }

    /// Move the eyes horizontally (0% left, 100% right)
    pub fn look_horizontal(&mut self, position: Percent, speed: u16, now_ms: u64) -> u32 {
        self.eyeballs.position_x(position, speed, now_ms)
    }

    /// Move the eyes vertically (0% down, 100% up)
    pub fn look_vertical(&mut self, position: Percent, speed: u16, now_ms: u64) -> u32 {
        self.eyeballs.position_y(position, speed, now_ms)
    }

    /// Aim the eyes at a range sensor point of interest
    pub fn look_at(&mut self, point: &PointOfInterest, speed: u16, now_ms: u64) -> u32 {
        self.eyeballs.look_at(point, speed, now_ms)
    }

    /// Both eyeball axes
    pub fn eyeballs(&self) -> &Eyeball {
        &self.eyeballs
    }

    /// Upper and lower eyelid of one eye
    pub fn eyelids(&self, side: Side) -> (&Eyelid, &Eyelid) {
        match side {
            Side::Left => (&self.left_upper, &self.left_lower),
            Side::Right => (&self.right_upper, &self.right_lower),
        }
    }
}

impl Limb for Head {
    fn initialize<P: PwmOutput + ?Sized>(&mut self, pwm: &mut P) {
        self.eyeballs.initialize(pwm);
        self.left_upper.initialize(pwm);
        self.left_lower.initialize(pwm);
        self.right_upper.initialize(pwm);
        self.right_lower.initialize(pwm);
    }

    fn advance<P: PwmOutput + ?Sized>(&mut self, now_ms: u64, pwm: &mut P) {
        self.eyeballs.advance(now_ms, pwm);
        self.left_upper.advance(now_ms, pwm);
        self.left_lower.advance(now_ms, pwm);
        self.right_upper.advance(now_ms, pwm);
        self.right_lower.advance(now_ms, pwm);
    }

    fn is_at_rest(&self) -> bool {
        self.eyeballs.is_at_rest()
            && self.left_upper.is_at_rest()
            && self.left_lower.is_at_rest()
            && self.right_upper.is_at_rest()
            && self.right_lower.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::calibration::channel;
    use heapless::Vec;

    #[derive(Default)]
    struct RecordingPwm {
        writes: Vec<(u8, u16, u16), 64>,
    }

    impl PwmOutput for RecordingPwm {
        fn set_pwm(&mut self, channel: u8, on: u16, off: u16) {
            let _ = self.writes.push((channel, on, off));
        }
    }

    impl RecordingPwm {
        /// Distinct channels written, ascending
        fn channels(&self) -> Vec<u8, 64> {
            let mut channels: Vec<u8, 64> = Vec::new();
            for (channel, _, _) in self.writes.iter() {
                if !channels.contains(channel) {
                    let _ = channels.push(*channel);
                }
            }
            channels.sort_unstable();
            channels
        }
    }

    fn head() -> Head {
        Head::new(&HeadCalibration::BOBG, MotionProfile::Linear, 1)
    }

    #[test]
    fn test_initialize_writes_every_channel_once() {
        let mut pwm = RecordingPwm::default();
        let mut head = head();
        head.initialize(&mut pwm);

        assert_eq!(pwm.writes.len(), 6);
        assert_eq!(pwm.channels().as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert!(pwm.writes.contains(&(channel::LEFT_UPPER, 0, 500)));
        assert!(pwm.writes.contains(&(channel::RIGHT_LOWER, 0, 536)));
        assert!(head.is_at_rest());
    }

    #[test]
    fn test_eyes_openness_returns_slowest_lid() {
        let mut head = head();
        let all = head.set_eyes_openness(Percent::FULL, 10, 0);

        // Right lower travels furthest: 536 -> 266
        let mut probe = head.clone();
        let right = probe.set_side_openness(Side::Right, Percent::FULL, 10, 0);
        assert_eq!(all, right);
        assert_eq!(right, (270 / 10 + 1) + 270);
    }

    #[test]
    fn test_side_openness_leaves_other_eye() {
        let mut head = head();
        head.set_side_openness(Side::Left, Percent::FULL, 10, 0);

        let (upper, lower) = head.eyelids(Side::Left);
        assert_eq!(upper.actuator().destination(), 281);
        assert_eq!(lower.actuator().destination(), 538);

        let (upper, lower) = head.eyelids(Side::Right);
        assert_eq!(upper.actuator().destination(), 255);
        assert_eq!(lower.actuator().destination(), 536);
    }

    #[test]
    fn test_advance_reaches_every_moving_limb() {
        let mut pwm = RecordingPwm::default();
        let mut head = head();
        head.initialize(&mut pwm);
        pwm.writes.clear();

        head.set_eyes_openness(Percent::FULL, 10, 0);
        head.look_horizontal(Percent::ZERO, 10, 0);
        head.look_vertical(Percent::FULL, 10, 0);
        head.advance(1, &mut pwm);

        assert_eq!(pwm.channels().as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert!(!head.is_at_rest());
    }

    #[test]
    fn test_settles_after_estimate() {
        let mut pwm = RecordingPwm::default();
        let mut head = Head::new(&HeadCalibration::JIMS, MotionProfile::Linear, 1);
        head.initialize(&mut pwm);

        let estimate = head
            .set_eyes_openness(Percent::HALF, 10, 0)
            .max(head.look_center(10, 0));
        for now in 1..=estimate as u64 {
            pwm.writes.clear();
            head.advance(now, &mut pwm);
        }
        assert!(head.is_at_rest());
    }

    #[test]
    fn test_look_at_delegates_to_eyeballs() {
        let mut head = head();
        let point = PointOfInterest {
            detected_at_ms: 5,
            distance_mm: 400,
            focus: Some((7, 0)),
        };
        assert!(head.look_at(&point, 10, 5) > 0);
        assert_eq!(head.eyeballs().x().destination(), 291);
        assert_eq!(head.eyeballs().y().destination(), 509);
    }
}
