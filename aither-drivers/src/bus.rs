//! Two-wire master transactions
//!
//! Sequencing layer over the [`TwiPeripheral`] register window. A
//! transaction is: address phase with a direction bit, data phases one
//! byte per completion flag, and a terminating STOP (or NACK+STOP for
//! reads). The 16-bit word operations encode the sensor's big-endian
//! wire format on top of the byte primitives.
//!
//! # Bus release invariant
//!
//! Every failure path releases the bus: a NACK or an expired flag wait
//! issues STOP before the error is returned, so the next transaction
//! always starts from a defined bus state. The only way a transaction is
//! left open is the deliberate command-then-read continuation, where the
//! caller follows up with a repeated-start address phase.

use aither_hal::twi::{BusCommand, Direction, TwiError, TwiPeripheral};

/// Default bound on a completion-flag spin wait.
///
/// At standard-mode bit times a byte is on the wire for well under 100 us;
/// this budget is orders of magnitude above that, so it only trips when
/// the bus is actually stuck.
pub const DEFAULT_SPIN_BUDGET: u32 = 100_000;

/// Two-wire bus master
///
/// Owns the host peripheral and sequences transactions on it.
pub struct TwiMaster<P> {
    periph: P,
    spin_budget: u32,
}

impl<P: TwiPeripheral> TwiMaster<P> {
    /// Create a master with the default spin budget
    pub fn new(periph: P) -> Self {
        Self::with_spin_budget(periph, DEFAULT_SPIN_BUDGET)
    }

    /// Create a master with an explicit spin budget
    pub fn with_spin_budget(periph: P, spin_budget: u32) -> Self {
        Self {
            periph,
            spin_budget,
        }
    }

    /// Drive the address phase toward `address` (7-bit).
    ///
    /// Blocks until the completion flag for `direction` is set, then
    /// inspects the acknowledge bit. On NACK the bus is stopped and the
    /// transaction never reaches a data phase. For a read, the first data
    /// byte is already waiting in the data register once this returns.
    pub fn begin(&mut self, address: u8, direction: Direction) -> Result<(), TwiError> {
        self.periph.start((address << 1) | direction as u8);
        match direction {
            Direction::Write => self.wait_write()?,
            Direction::Read => self.wait_read()?,
        }
        if self.periph.nack_received() {
            self.periph.issue(BusCommand::Stop);
            return Err(TwiError::Nack);
        }
        Ok(())
    }

    /// Transfer one byte to the target and check its acknowledge.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), TwiError> {
        self.periph.write_data(byte);
        self.wait_write()?;
        if self.periph.nack_received() {
            self.periph.issue(BusCommand::Stop);
            return Err(TwiError::Nack);
        }
        Ok(())
    }

    /// Consume the received byte, acknowledge it, and clock in the next.
    pub fn read_byte(&mut self) -> Result<u8, TwiError> {
        let byte = self.periph.read_data();
        self.periph.issue(BusCommand::AckThenReceive);
        self.wait_read()?;
        Ok(byte)
    }

    /// Consume the final byte of a read without another ACK/NACK cycle.
    ///
    /// Must be followed by [`finish_read`](Self::finish_read); the target
    /// still holds the bus until the NACK+STOP goes out.
    pub fn read_last_byte(&mut self) -> u8 {
        self.periph.read_data()
    }

    /// Write a 16-bit word, MSB first.
    ///
    /// The byte order is the sensor's documented wire format; both bytes
    /// are acknowledge-checked and a NACK on either aborts with STOP.
    pub fn write_word(&mut self, word: u16) -> Result<(), TwiError> {
        self.write_byte((word >> 8) as u8)?;
        self.periph.issue(BusCommand::NextTransfer);
        self.write_byte(word as u8)
    }

    /// Read a 16-bit word, MSB first, acknowledging both bytes.
    pub fn read_word(&mut self) -> Result<u16, TwiError> {
        let hi = self.read_byte()?;
        let lo = self.read_byte()?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }

    /// Issue a STOP condition, releasing the bus.
    pub fn stop(&mut self) {
        self.periph.issue(BusCommand::Stop);
    }

    /// Terminate a read: NACK the last received byte, then STOP.
    pub fn finish_read(&mut self) {
        self.periph.issue(BusCommand::NackThenStop);
    }

    /// Shared access to the underlying peripheral
    pub fn peripheral(&self) -> &P {
        &self.periph
    }

    /// Tear down, handing the peripheral back
    pub fn release(self) -> P {
        self.periph
    }

    fn wait_write(&mut self) -> Result<(), TwiError> {
        for _ in 0..self.spin_budget {
            if self.periph.write_complete() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        self.periph.issue(BusCommand::Stop);
        Err(TwiError::Timeout)
    }

    fn wait_read(&mut self) -> Result<(), TwiError> {
        for _ in 0..self.spin_budget {
            if self.periph.read_complete() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        self.periph.issue(BusCommand::Stop);
        Err(TwiError::Timeout)
    }
}
