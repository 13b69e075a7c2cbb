//! Air sensor trait

use crate::reading::SensorReading;

/// Errors that can occur while talking to the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The sensor did not acknowledge an address or data byte
    Nack,
    /// A bus wait exceeded its bound
    Timeout,
}

/// Trait for combined CO2 / temperature / humidity sensors
///
/// Implementations own the wire protocol; the sampling loop only sees
/// decoded readings. Every operation takes `&mut self` because each one
/// drives a bus transaction.
pub trait AirSensor {
    /// Begin periodic measurement
    fn start_measuring(&mut self) -> Result<(), SensorError>;

    /// End periodic measurement
    fn stop_measuring(&mut self) -> Result<(), SensorError>;

    /// Whether a fresh measurement is waiting to be fetched
    fn measurement_ready(&mut self) -> Result<bool, SensorError>;

    /// Fetch and decode the pending measurement
    fn take_measurement(&mut self) -> Result<SensorReading, SensorError>;
}
