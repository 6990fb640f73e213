//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod pwm;
pub mod sensor;

pub use pwm::PwmOutput;
pub use sensor::{PointOfInterest, PointOfInterestSource, TOF_GRID_SIZE};
