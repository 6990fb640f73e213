//! PWM output trait
//!
//! Abstracts over the servo driver chip and its bus transport.

/// Multi-channel PWM output
///
/// Each channel has a 12-bit on/off window. Servos only ever use `on = 0`
/// and vary `off` as the pulse width in raw counts.
pub trait PwmOutput {
    /// Set the on/off counts of one channel
    ///
    /// Fire-and-forget: implementations handle transport failures
    /// themselves and never report them to the caller.
    fn set_pwm(&mut self, channel: u8, on: u16, off: u16);
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    fn set_pwm(&mut self, channel: u8, on: u16, off: u16) {
        (**self).set_pwm(channel, on, off);
    }
}
