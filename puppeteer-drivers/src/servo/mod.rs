//! Servo output drivers

pub mod pca9685;

pub use pca9685::{prescale_for, ServoBoard, ServoBoardError, SERVO_CHANNELS};
