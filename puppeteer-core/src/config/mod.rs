//! Configuration
//!
//! Board-agnostic configuration structures and the parser for the embedded
//! `puppet.toml`.

pub mod calibration;
pub mod toml;
pub mod types;

pub use calibration::*;
pub use types::*;
