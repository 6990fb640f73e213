//! Configuration type definitions
//!
//! These types represent the puppet configuration. The firmware builds
//! them from the embedded `puppet.toml` at boot.

use heapless::Vec;

use super::calibration::HeadCalibration;
use crate::mechanism::Head;
use crate::motion::MotionProfile;
use crate::scheduler::{SceneEntry, SceneRunner, SceneTable, MAX_SCENES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default PCA9685 I2C address (all address pins low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x40;

/// Analog servos run at ~60 Hz updates
pub const DEFAULT_PWM_HZ: u16 = 60;

/// Default minimum interval between actuator steps
pub const DEFAULT_TICK_MS: u32 = 1;

/// Servo board settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// 7-bit I2C address of the PWM chip
    pub i2c_address: u8,
    /// PWM frame rate in Hz
    pub pwm_hz: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            pwm_hz: DEFAULT_PWM_HZ,
        }
    }
}

/// Actuator motion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Interpolation regime for every actuator
    pub profile: MotionProfile,
    /// Minimum interval between steps (ms)
    pub tick_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            profile: MotionProfile::Decay,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// Scene playback settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchedulerConfig {
    /// Start playing the table at boot
    pub autostart: bool,
    /// Start over when the table finishes
    pub loop_run: bool,
    /// Runtime capacity of the scene table
    pub scene_limit: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            loop_run: true,
            scene_limit: MAX_SCENES,
        }
    }
}

/// Complete puppet configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PuppetConfig {
    pub board: BoardConfig,
    pub motion: MotionConfig,
    pub head: HeadCalibration,
    pub scheduler: SchedulerConfig,
    /// Scene table contents in playback order
    pub scenes: Vec<SceneEntry, MAX_SCENES>,
}

impl PuppetConfig {
    /// Build the head described by this configuration
    pub fn build_head(&self) -> Head {
        Head::new(&self.head, self.motion.profile, self.motion.tick_ms)
    }

    /// Build a scene table holding the configured scenes
    ///
    /// Scenes past the table limit are dropped with a warning.
    pub fn build_table(&self) -> SceneTable {
        let mut table = SceneTable::with_limit(self.scheduler.scene_limit);
        if table.load(&self.scenes).is_err() {
            warn!(
                "scene table holds {} of {} configured scenes",
                table.len(),
                self.scenes.len()
            );
        }
        table
    }

    /// Build an idle runner for this configuration
    pub fn build_runner(&self) -> SceneRunner {
        SceneRunner::new(self.build_table(), self.build_head())
    }
}
