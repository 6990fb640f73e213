//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Playback command for the animation task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunCommand {
    /// Pause a running table, resume a paused one
    Toggle,
    /// Play the table again from the first entry
    Restart,
}

/// Playback control (written by the button task)
pub static RUN_CONTROL: Signal<CriticalSectionRawMutex, RunCommand> = Signal::new();
