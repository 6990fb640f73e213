//! Playback button
//!
//! A short press pauses or resumes the scene table, a long press restarts it.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use crate::channels::{RunCommand, RUN_CONTROL};

const DEBOUNCE_MS: u64 = 20;
const RELEASE_SETTLE_MS: u64 = 50;
const LONG_PRESS_MS: u64 = 500;
const MIN_CLICK_MS: u64 = 50;

/// Button task - turns presses into run commands
#[embassy_executor::task]
pub async fn button_task(mut btn: Input<'static>) {
    info!("Button task started");

    loop {
        btn.wait_for_falling_edge().await;
        let press_start = Instant::now();

        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if btn.is_high() {
            continue;
        }

        let released = with_timeout(
            Duration::from_millis(LONG_PRESS_MS),
            btn.wait_for_rising_edge(),
        )
        .await;

        match released {
            Ok(()) => {
                if press_start.elapsed().as_millis() > MIN_CLICK_MS {
                    debug!("Button: click");
                    RUN_CONTROL.signal(RunCommand::Toggle);
                }
            }
            Err(_) => {
                debug!("Button: long press");
                RUN_CONTROL.signal(RunCommand::Restart);
                btn.wait_for_rising_edge().await;
            }
        }

        Timer::after(Duration::from_millis(RELEASE_SETTLE_MS)).await;
    }
}
