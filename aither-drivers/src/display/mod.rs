//! Display drivers

pub mod serlcd;

pub use serlcd::SerLcd;
