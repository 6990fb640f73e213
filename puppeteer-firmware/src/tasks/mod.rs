//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod animation;
pub mod button;

pub use animation::{animation_task, AnimationSettings, ServoBus};
pub use button::button_task;
