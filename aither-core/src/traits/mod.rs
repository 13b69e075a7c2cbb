//! Device role traits
//!
//! These traits define the interface between the sampling loop and the
//! concrete device drivers.

pub mod display;
pub mod sensor;

pub use display::{DisplayError, TextDisplay};
pub use sensor::{AirSensor, SensorError};
