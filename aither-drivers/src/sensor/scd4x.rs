//! SCD4x CO2/temperature/humidity sensor
//!
//! The Sensirion SCD4x family sits at a fixed two-wire address and speaks
//! a command-word protocol: every operation starts with a 16-bit opcode,
//! and fetch-type operations reopen the bus in read direction after a
//! short execution delay.
//!
//! # Exchange shapes
//!
//! - Plain command: address (W), opcode, STOP.
//! - Fetch: address (W), opcode, settle delay, repeated-start address (R),
//!   one or more big-endian data words each trailed by a CRC byte,
//!   NACK+STOP. The final CRC is taken straight from the data register
//!   because no further byte may be clocked in.
//!
//! The CRC bytes are consumed and discarded; wire corruption is not
//! detected.

use aither_core::reading::{ReadyStatus, SensorReading};
use aither_core::traits::{AirSensor, SensorError};
use aither_hal::twi::{Direction, TwiError, TwiPeripheral};
use embedded_hal::delay::DelayNs;

use crate::bus::TwiMaster;

/// Fixed 7-bit bus address of the SCD4x
pub const SENSOR_ADDRESS: u8 = 0x62;

/// Minimum command execution time before the read phase of a fetch, in us
const COMMAND_SETTLE_US: u32 = 1_500;

/// Settle time after stopping periodic measurement, in ms
const STOP_SETTLE_MS: u32 = 500;

/// SCD4x command opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    StopPeriodicMeasurement,
    StartPeriodicMeasurement,
    ReadMeasurement,
    GetDataReadyStatus,
}

impl Command {
    /// The 16-bit opcode sent over the wire
    pub const fn opcode(self) -> u16 {
        match self {
            Command::StopPeriodicMeasurement => 0x3f86,
            Command::StartPeriodicMeasurement => 0x21b1,
            Command::ReadMeasurement => 0xec05,
            Command::GetDataReadyStatus => 0xe4b8,
        }
    }
}

/// What follows a command word on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceKind {
    /// The command stands alone; STOP goes out right after the opcode
    SendCommand,
    /// The transaction stays open for a read phase under repeated start
    CommandThenRead,
}

/// Convert a raw temperature count to degrees Celsius.
///
/// The sensor maps its full 16-bit range linearly onto -45..=130 °C. The
/// divisor is exactly 65535 to match the factory calibration.
pub fn decode_temperature(raw: u16) -> f32 {
    -45.0 + 175.0 * (raw as f32 / 65535.0)
}

/// Convert a raw humidity count to percent relative humidity.
pub fn decode_relative_humidity(raw: u16) -> f32 {
    100.0 * (raw as f32 / 65535.0)
}

/// SCD4x driver
///
/// Generic over the two-wire peripheral and a delay provider; both are
/// owned for the lifetime of the driver because every exchange needs
/// exclusive use of the bus. The bus itself must already be configured
/// per [`TwiConfig::STANDARD`](aither_hal::twi::TwiConfig::STANDARD)
/// before the first exchange.
pub struct Scd4x<P, D> {
    bus: TwiMaster<P>,
    delay: D,
}

impl<P: TwiPeripheral, D: DelayNs> Scd4x<P, D> {
    /// Create a driver over a fresh bus master
    pub fn new(periph: P, delay: D) -> Self {
        Self {
            bus: TwiMaster::new(periph),
            delay,
        }
    }

    /// Create a driver over an already-configured bus master
    pub fn with_bus(bus: TwiMaster<P>, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Send a command word to the sensor.
    ///
    /// A NACK during the address phase aborts with STOP before any data
    /// moves. STOP after the opcode is only issued for
    /// [`SequenceKind::SendCommand`]; a fetch keeps the bus for its read
    /// phase.
    pub fn send_command(&mut self, command: Command, kind: SequenceKind) -> Result<(), TwiError> {
        self.bus.begin(SENSOR_ADDRESS, Direction::Write)?;
        self.bus.write_word(command.opcode())?;
        if kind == SequenceKind::SendCommand {
            self.bus.stop();
        }
        Ok(())
    }

    /// Start periodic measurement (one reading every few seconds)
    pub fn start_periodic_measurement(&mut self) -> Result<(), TwiError> {
        self.send_command(Command::StartPeriodicMeasurement, SequenceKind::SendCommand)
    }

    /// Stop periodic measurement.
    ///
    /// The sensor refuses most commands while it winds down, so this
    /// blocks through the documented settle time before returning.
    pub fn stop_periodic_measurement(&mut self) -> Result<(), TwiError> {
        self.send_command(Command::StopPeriodicMeasurement, SequenceKind::SendCommand)?;
        self.delay.delay_ms(STOP_SETTLE_MS);
        Ok(())
    }

    /// Ask the sensor whether a measurement is waiting.
    pub fn data_ready(&mut self) -> Result<ReadyStatus, TwiError> {
        self.open_fetch(Command::GetDataReadyStatus)?;
        let status = self.bus.read_word()?;
        let _crc = self.bus.read_last_byte();
        self.bus.finish_read();
        Ok(ReadyStatus::from_raw(status))
    }

    /// Fetch and decode the pending measurement.
    ///
    /// Reads the three data words in the sensor's fixed order - CO2,
    /// temperature, humidity - each trailed by a CRC byte, and terminates
    /// the transaction with NACK+STOP.
    pub fn read_measurement(&mut self) -> Result<SensorReading, TwiError> {
        self.open_fetch(Command::ReadMeasurement)?;

        let co2 = self.bus.read_word()?;
        self.discard_crc()?;
        let temperature = self.bus.read_word()?;
        self.discard_crc()?;
        let humidity = self.bus.read_word()?;
        let _crc = self.bus.read_last_byte();
        self.bus.finish_read();

        Ok(SensorReading {
            co2_ppm: co2,
            temperature_celsius: decode_temperature(temperature),
            relative_humidity_percent: decode_relative_humidity(humidity),
        })
    }

    /// Dispatch a fetch command, wait out its execution time, and reopen
    /// the bus in read direction.
    fn open_fetch(&mut self, command: Command) -> Result<(), TwiError> {
        self.send_command(command, SequenceKind::CommandThenRead)?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        self.bus.begin(SENSOR_ADDRESS, Direction::Read)
    }

    /// Consume a mid-transaction CRC byte without checking it.
    fn discard_crc(&mut self) -> Result<(), TwiError> {
        self.bus.read_byte().map(|_| ())
    }
}

fn bus_error(e: TwiError) -> SensorError {
    match e {
        TwiError::Nack => SensorError::Nack,
        TwiError::Timeout => SensorError::Timeout,
    }
}

impl<P: TwiPeripheral, D: DelayNs> AirSensor for Scd4x<P, D> {
    fn start_measuring(&mut self) -> Result<(), SensorError> {
        self.start_periodic_measurement().map_err(bus_error)
    }

    fn stop_measuring(&mut self) -> Result<(), SensorError> {
        self.stop_periodic_measurement().map_err(bus_error)
    }

    fn measurement_ready(&mut self) -> Result<bool, SensorError> {
        self.data_ready().map(ReadyStatus::is_ready).map_err(bus_error)
    }

    fn take_measurement(&mut self) -> Result<SensorReading, SensorError> {
        self.read_measurement().map_err(bus_error)
    }
}
