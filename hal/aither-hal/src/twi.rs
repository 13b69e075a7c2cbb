//! Two-wire (I2C) host peripheral abstractions
//!
//! Models the flag-polled register window of a two-wire host peripheral:
//! an address/start register, a data register, completion flags for each
//! transfer direction, the received-acknowledge bit, and a command register
//! for the bus handshakes (ACK, NACK, STOP). The transaction sequencing on
//! top of this window lives in `aither-drivers`.

/// Transfer direction encoded into the low bit of the address byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Host writes to the target
    Write = 0,
    /// Host reads from the target
    Read = 1,
}

/// Bus handshake commands issued while a transaction is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusCommand {
    /// Acknowledge the received byte and clock the next one in
    AckThenReceive,
    /// Start the next byte transfer in the current direction
    NextTransfer,
    /// Issue a STOP condition and release the bus
    Stop,
    /// Send NACK for the last received byte, then STOP
    NackThenStop,
}

/// Errors reported by two-wire bus operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiError {
    /// Target did not acknowledge an address or data byte
    Nack,
    /// A completion-flag wait exceeded its spin budget
    Timeout,
}

/// Two-wire host peripheral register window
///
/// One byte moves per completion flag; the implementation only exposes the
/// registers and never sequences transfers itself.
pub trait TwiPeripheral {
    /// Load the address byte (7-bit address plus direction bit), driving a
    /// start (or repeated start) condition and the address phase.
    fn start(&mut self, address_byte: u8);

    /// Whether the write-direction completion flag is set
    fn write_complete(&self) -> bool;

    /// Whether the read-direction completion flag is set
    fn read_complete(&self) -> bool;

    /// Whether the target answered the last transfer with NACK
    fn nack_received(&self) -> bool;

    /// Take the byte currently held in the data register
    fn read_data(&mut self) -> u8;

    /// Load a byte into the data register, starting its transfer
    fn write_data(&mut self, byte: u8);

    /// Issue a bus handshake command
    fn issue(&mut self, command: BusCommand);
}

/// Two-wire bus configuration
///
/// The bootstrap code owns the actual register setup (clock rate, host
/// mode, forcing the bus idle); this type carries the parameters it needs.
#[derive(Debug, Clone, Copy)]
pub struct TwiConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
    /// Settle time after power-up before the first transaction, in ms.
    /// The sensor needs up to a second to reach its idle state.
    pub startup_settle_ms: u32,
}

impl Default for TwiConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TwiConfig {
    /// Standard mode (100 kHz), the only speed the sensor bus runs at
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        startup_settle_ms: 1050,
    };
}
