//! Hardware driver implementations
//!
//! This crate provides the concrete device drivers for the air quality
//! monitor, generic over the traits defined in aither-hal:
//!
//! - Two-wire master transactions (the sensor bus primitive)
//! - SCD4x CO2/temperature/humidity sensor
//! - SerLCD 20x4 character display

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testutil;
