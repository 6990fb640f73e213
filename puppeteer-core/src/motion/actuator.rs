//! Per-servo motion interpolation
//!
//! An [`Actuator`] owns the simulated position of one PWM channel and walks
//! it toward a destination one step per tick, writing each intermediate raw
//! value to the PWM output.

use crate::traits::PwmOutput;

use super::profile::{Direction, MotionProfile, ARRIVAL_THRESHOLD, POSITION_SCALE};

/// Result of one [`Actuator::advance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Tick period has not elapsed since the last step
    Waiting,
    /// At rest, nothing to do
    Idle,
    /// Reached the destination on this call (reported once per move)
    Arrived,
    /// Stepped and wrote this raw value
    Moved(i32),
}

/// Motion state of a single servo channel
#[derive(Debug, Clone)]
pub struct Actuator {
    channel: u8,
    profile: MotionProfile,
    /// Minimum interval between steps
    tick_ms: u32,
    /// Current simulated position (raw counts * 100)
    position_x100: i32,
    destination: i32,
    direction: Direction,
    speed: u16,
    start_position: i32,
    move_started_ms: u64,
    last_step_ms: u64,
    arrival_reported: bool,
}

impl Actuator {
    /// Create an actuator resting at `initial`
    ///
    /// Nothing is written until [`initialize`](Self::initialize).
    pub fn new(channel: u8, initial: i32, profile: MotionProfile, tick_ms: u32) -> Self {
        Self {
            channel,
            profile,
            tick_ms,
            position_x100: initial.saturating_mul(POSITION_SCALE),
            destination: initial,
            direction: Direction::default(),
            speed: 0,
            start_position: initial,
            move_started_ms: 0,
            last_step_ms: 0,
            arrival_reported: true,
        }
    }

    /// Drive the servo to its initial position
    pub fn initialize<P: PwmOutput + ?Sized>(&mut self, pwm: &mut P) {
        self.destination = self.position();
        self.arrival_reported = true;
        self.write(pwm);
    }

    /// Begin a move toward `destination`
    ///
    /// Replaces any move in flight. Nothing is written until the next
    /// [`advance`](Self::advance).
    ///
    /// # Returns
    /// Estimated duration of the move in milliseconds
    pub fn start_move(&mut self, destination: i32, speed: u16, now_ms: u64) -> u32 {
        let position = self.position();
        self.destination = destination;
        self.speed = speed;
        self.start_position = position;
        self.move_started_ms = now_ms;
        self.direction = Direction::between(position, destination);
        self.arrival_reported = false;

        let estimate = self
            .profile
            .estimate_ms(self.remaining_x100(), speed, self.tick_ms);

        debug!(
            "ch {}: move {} -> {} speed {} est {} ms",
            self.channel,
            position,
            destination,
            speed,
            estimate
        );

        estimate
    }

    /// Take one step if the tick period has elapsed
    pub fn advance<P: PwmOutput + ?Sized>(&mut self, now_ms: u64, pwm: &mut P) -> StepOutcome {
        if now_ms.saturating_sub(self.last_step_ms) < self.tick_ms as u64 {
            return StepOutcome::Waiting;
        }

        if (self.position() - self.destination).abs() < ARRIVAL_THRESHOLD {
            self.position_x100 = self.destination.saturating_mul(POSITION_SCALE);
            if self.arrival_reported {
                return StepOutcome::Idle;
            }
            self.arrival_reported = true;
            debug!(
                "ch {}: arrived at {} from {} after {} ms",
                self.channel,
                self.destination,
                self.start_position,
                now_ms.saturating_sub(self.move_started_ms)
            );
            return StepOutcome::Arrived;
        }

        let step = self.profile.step_x100(self.remaining_x100(), self.speed) as i32;
        let target_x100 = self.destination.saturating_mul(POSITION_SCALE);
        let next = self.position_x100 + self.direction.sign() * step;
        self.position_x100 = match self.direction {
            Direction::Increasing => next.min(target_x100),
            Direction::Decreasing => next.max(target_x100),
        };

        let raw = self.write(pwm);
        self.last_step_ms = now_ms;
        trace!("ch {}: step to {}", self.channel, raw);
        StepOutcome::Moved(raw)
    }

    /// PWM channel driven by this actuator
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Current position in whole raw counts (rounded down)
    pub fn position(&self) -> i32 {
        self.position_x100.div_euclid(POSITION_SCALE)
    }

    /// Current position in hundredths of a raw count
    pub fn position_x100(&self) -> i32 {
        self.position_x100
    }

    /// Destination of the current (or last) move
    pub fn destination(&self) -> i32 {
        self.destination
    }

    /// Direction of the current (or last) move
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Speed of the current (or last) move
    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// Interpolation regime
    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Check if the actuator has settled on its destination
    pub fn is_at_rest(&self) -> bool {
        self.arrival_reported || self.remaining_x100() == 0
    }

    fn remaining_x100(&self) -> u32 {
        self.position_x100
            .abs_diff(self.destination.saturating_mul(POSITION_SCALE))
    }

    fn write<P: PwmOutput + ?Sized>(&self, pwm: &mut P) -> i32 {
        let raw = self.position();
        pwm.set_pwm(self.channel, 0, raw.clamp(0, u16::MAX as i32) as u16);
        raw
    }
}
