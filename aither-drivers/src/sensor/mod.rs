//! Sensor drivers

pub mod scd4x;

pub use scd4x::Scd4x;
