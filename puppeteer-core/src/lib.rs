//! Board-agnostic core logic for the animatronic eye firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (PWM output, range sensor)
//! - Per-servo motion interpolation (actuators)
//! - Calibrated mechanisms (eyelids, eyeballs, the head assembly)
//! - Scene table and cooperative scene scheduler
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod mechanism;
pub mod motion;
pub mod scheduler;
pub mod traits;
