//! Puppeteer - Animatronic Eye Firmware
//!
//! Main firmware binary for RP2040 boards driving an eye mechanism through
//! a PCA9685 servo board. Two eyeball axes and four eyelids play a scene
//! table described in puppet.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use puppeteer_core::config::toml::parse_config;
use puppeteer_core::config::PuppetConfig;
use puppeteer_drivers::servo::ServoBoard;

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit puppet.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../puppet.toml");

/// I2C clock for the servo board
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Puppeteer firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Configuration: board 0x{:02x} @ {}Hz, profile {}, {} scenes",
        config.board.i2c_address,
        config.board.pwm_hz,
        config.motion.profile.name(),
        config.scenes.len()
    );

    // Servo board on I2C0 (SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut board = match ServoBoard::new(i2c, config.board.i2c_address) {
        Ok(board) => board,
        Err(e) => {
            defmt::panic!(
                "Servo board address 0x{:02x} rejected: {}",
                config.board.i2c_address,
                e
            );
        }
    };

    if let Err(e) = board.init(config.board.pwm_hz) {
        // Keep going: writes are counted and reported by the animation task
        error!("Servo board init failed: {}", e);
    }

    let runner = config.build_runner();
    let settings = tasks::AnimationSettings::from(&config);

    // Playback button on GPIO15, active low
    let button = Input::new(p.PIN_15, Pull::Up);

    spawner
        .spawn(tasks::animation_task(board, runner, settings))
        .unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
///
/// Falls back to the built-in calibration with an empty scene table if the
/// embedded file does not parse. build.rs rejects such files, so this only
/// happens when the check is bypassed.
fn load_config() -> PuppetConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            warn!("Using default configuration");
            PuppetConfig::default()
        }
    }
}
