//! Animation task
//!
//! Owns the servo board and the scene runner, and drives both from a
//! fixed-rate ticker. Playback commands arrive over [`RUN_CONTROL`].

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use puppeteer_core::config::PuppetConfig;
use puppeteer_core::scheduler::{SceneEvent, SceneRunner};
use puppeteer_drivers::servo::ServoBoard;

use crate::channels::{RunCommand, RUN_CONTROL};

/// I2C bus the servo board sits on
pub type ServoBus = I2c<'static, I2C0, Blocking>;

/// Minimum gap between failed-write reports (ms)
const ERROR_REPORT_INTERVAL_MS: u64 = 1000;

/// Playback settings taken from the puppet config
#[derive(Debug, Clone, Copy)]
pub struct AnimationSettings {
    /// Ticker period (ms)
    pub tick_ms: u32,
    /// Start the table at boot
    pub autostart: bool,
    /// Play the table again when it finishes
    pub loop_run: bool,
}

impl From<&PuppetConfig> for AnimationSettings {
    fn from(config: &PuppetConfig) -> Self {
        Self {
            tick_ms: config.motion.tick_ms.max(1),
            autostart: config.scheduler.autostart,
            loop_run: config.scheduler.loop_run,
        }
    }
}

/// Animation task - steps the scene runner every tick
#[embassy_executor::task]
pub async fn animation_task(
    mut board: ServoBoard<ServoBus>,
    mut runner: SceneRunner,
    settings: AnimationSettings,
) {
    info!(
        "Animation task started: tick={}ms, {} scenes",
        settings.tick_ms,
        runner.entries().len()
    );

    let mut ticker = Ticker::every(Duration::from_millis(settings.tick_ms as u64));
    let start = Instant::now();

    runner.initialize(&mut board);
    if settings.autostart {
        runner.start(0);
    }

    let mut reported_errors = 0u32;
    let mut last_report_ms = 0u64;

    loop {
        match select(ticker.next(), RUN_CONTROL.wait()).await {
            Either::First(()) => {
                let now_ms = start.elapsed().as_millis();

                if let Some(event) = runner.process(now_ms, &mut board) {
                    handle_event(&mut runner, event, settings.loop_run, now_ms);
                }

                let errors = board.write_errors();
                if errors != reported_errors
                    && now_ms.saturating_sub(last_report_ms) >= ERROR_REPORT_INTERVAL_MS
                {
                    warn!("Servo board: {} failed writes", errors);
                    reported_errors = errors;
                    last_report_ms = now_ms;
                }
            }
            Either::Second(command) => {
                let now_ms = start.elapsed().as_millis();
                handle_command(&mut runner, command, now_ms);
            }
        }
    }
}

fn handle_event(runner: &mut SceneRunner, event: SceneEvent, loop_run: bool, now_ms: u64) {
    match event {
        SceneEvent::SceneStarted {
            index,
            scene,
            duration_ms,
        } => {
            debug!("Scene {}: {} for {}ms", index, scene, duration_ms);
        }
        SceneEvent::UnknownScene { index, scene } => {
            warn!("Scene {}: skipped unknown id {}", index, scene);
        }
        SceneEvent::RunFinished => {
            // An empty table would otherwise finish again on every tick
            if loop_run && !runner.entries().is_empty() {
                runner.start(now_ms);
            }
        }
    }
}

fn handle_command(runner: &mut SceneRunner, command: RunCommand, now_ms: u64) {
    info!("Run command: {}", command);
    match command {
        RunCommand::Toggle => {
            if runner.is_running() {
                runner.stop();
            } else {
                runner.resume(now_ms);
            }
        }
        RunCommand::Restart => runner.start(now_ms),
    }
}
