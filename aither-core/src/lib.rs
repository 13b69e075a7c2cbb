//! Board-agnostic core logic for the air quality monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device role traits (air sensor, text display)
//! - Sensor reading and readiness types
//! - The 4x20 screen buffer and reading-to-text renderer
//! - The sampling control loop

#![no_std]
#![deny(unsafe_code)]

pub mod monitor;
pub mod reading;
pub mod screen;
pub mod traits;

pub use monitor::{CycleError, CyclePolicy, Monitor};
pub use reading::{ReadyStatus, SensorReading};
pub use screen::Screen;
