//! Calibrated mechanisms
//!
//! A limb maps a 0-100 percentage onto the raw range of its actuators.
//! The [`Head`] groups every limb of the puppet.

pub mod eyeball;
pub mod eyelid;
pub mod head;
pub mod percent;

pub use eyeball::Eyeball;
pub use eyelid::Eyelid;
pub use head::{Head, Side};
pub use percent::Percent;

use crate::traits::PwmOutput;

/// Anything that owns actuators and steps them together
///
/// Implemented by each calibrated limb and by the [`Head`] that groups them.
pub trait Limb {
    /// Drive every actuator to its rest position
    fn initialize<P: PwmOutput + ?Sized>(&mut self, pwm: &mut P);

    /// Step every actuator whose tick period has elapsed
    fn advance<P: PwmOutput + ?Sized>(&mut self, now_ms: u64, pwm: &mut P);

    /// Check if every actuator has settled
    fn is_at_rest(&self) -> bool;
}
