//! PCA9685 servo board
//!
//! The PCA9685 is a 16-channel, 12-bit PWM controller on I2C. Each channel
//! has an on count and an off count within a 4096-count frame; the frame
//! rate is set by the prescaler from the 25 MHz internal oscillator.
//!
//! Register access goes through the `pwm-pca9685` crate. Writes from the
//! tick path never fail toward the caller: bus errors are counted and
//! logged so a flaky connector cannot stall the animation.

use embedded_hal::i2c::I2c;
use heapless::Vec;
use pwm_pca9685::{Address, Channel, Error, Pca9685};
use puppeteer_core::traits::PwmOutput;

/// Number of output channels
pub const SERVO_CHANNELS: u8 = 16;

/// Internal oscillator frequency
const OSCILLATOR_HZ: u32 = 25_000_000;

/// Counts per PWM frame
const COUNTS_PER_FRAME: u32 = 4096;

/// Largest on/off count
const MAX_COUNT: u16 = 4095;

/// Prescale range accepted by the chip
const PRESCALE_MIN: u8 = 3;
const PRESCALE_MAX: u8 = 255;

/// Errors from board setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoBoardError {
    /// I2C transfer failed
    Bus,
    /// Address or register value rejected
    InvalidInput,
}

impl<E> From<Error<E>> for ServoBoardError {
    fn from(err: Error<E>) -> Self {
        match err {
            Error::I2C(_) => ServoBoardError::Bus,
            _ => ServoBoardError::InvalidInput,
        }
    }
}

/// Prescaler value for a PWM frame rate
///
/// `round(25 MHz / (4096 * f)) - 1`, clamped to what the chip accepts.
pub fn prescale_for(frequency_hz: u16) -> u8 {
    if frequency_hz == 0 {
        return PRESCALE_MAX;
    }
    let divisor = COUNTS_PER_FRAME * frequency_hz as u32;
    let prescale = (OSCILLATOR_HZ + divisor / 2) / divisor;
    prescale
        .saturating_sub(1)
        .clamp(PRESCALE_MIN as u32, PRESCALE_MAX as u32) as u8
}

fn channel_from(index: u8) -> Option<Channel> {
    let channel = match index {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        15 => Channel::C15,
        _ => return None,
    };
    Some(channel)
}

/// PCA9685 servo board
pub struct ServoBoard<I2C> {
    pwm: Pca9685<I2C>,
    /// Failed writes since boot
    write_errors: u32,
    /// Channels written at least once
    active: Vec<u8, { SERVO_CHANNELS as usize }>,
}

impl<I2C: I2c> ServoBoard<I2C> {
    /// Create a driver for the board at `address` (7-bit)
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I2C, address: u8) -> Result<Self, ServoBoardError> {
        let pwm = Pca9685::new(i2c, Address::from(address))?;
        Ok(Self {
            pwm,
            write_errors: 0,
            active: Vec::new(),
        })
    }

    /// Set the frame rate and enable the outputs
    pub fn init(&mut self, frequency_hz: u16) -> Result<(), ServoBoardError> {
        let prescale = prescale_for(frequency_hz);
        self.pwm.set_prescale(prescale)?;
        self.pwm.enable()?;
        info!("PCA9685: {} Hz (prescale {})", frequency_hz, prescale);
        Ok(())
    }

    /// Number of writes that failed since boot
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Channels that have been driven at least once
    pub fn active_channels(&self) -> &[u8] {
        &self.active
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.pwm.destroy()
    }
}

impl<I2C: I2c> PwmOutput for ServoBoard<I2C> {
    fn set_pwm(&mut self, channel: u8, on: u16, off: u16) {
        let Some(ch) = channel_from(channel) else {
            self.write_errors = self.write_errors.saturating_add(1);
            error!("PCA9685: no channel {}", channel);
            return;
        };

        match self
            .pwm
            .set_channel_on_off(ch, on.min(MAX_COUNT), off.min(MAX_COUNT))
        {
            Ok(()) => {
                if !self.active.contains(&channel) {
                    let _ = self.active.push(channel);
                }
            }
            Err(_) => {
                self.write_errors = self.write_errors.saturating_add(1);
                error!(
                    "PCA9685: write to channel {} failed ({} errors)",
                    channel,
                    self.write_errors
                );
            }
        }
    }
}
