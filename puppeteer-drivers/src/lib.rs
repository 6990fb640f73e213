//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in puppeteer-core:
//!
//! - Servo output (PCA9685 16-channel PWM board over I2C)

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod servo;
