//! Shared test doubles for the driver tests

use aither_hal::twi::{BusCommand, TwiPeripheral};
use heapless::Vec;

/// Everything a transaction puts on the wire, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    /// Address phase with the raw address byte (direction bit included)
    Start(u8),
    /// Data byte written to the target
    Write(u8),
    /// Handshake command
    Command(BusCommand),
}

/// Scripted two-wire peripheral.
///
/// Completion flags are set unless a stall is scripted, received bytes
/// come from a fixed queue, and the acknowledge bit answers NACK for the
/// phase selected by the `nack_*` switches.
pub struct FakeTwi {
    /// Observed wire activity
    pub wire: Vec<WireEvent, 64>,
    /// Bytes the fake target returns, in order
    rx: Vec<u8, 32>,
    rx_pos: usize,
    /// NACK every address phase
    pub nack_address: bool,
    /// NACK only read-direction address phases
    pub nack_read_address: bool,
    /// NACK every written data byte
    pub nack_data: bool,
    /// Never set the write-completion flag
    pub stall_write: bool,
    /// Never set the read-completion flag
    pub stall_read: bool,
}

impl FakeTwi {
    pub fn new() -> Self {
        Self::with_rx(&[])
    }

    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut rx = Vec::new();
        rx.extend_from_slice(bytes).expect("rx script too long");
        Self {
            wire: Vec::new(),
            rx,
            rx_pos: 0,
            nack_address: false,
            nack_read_address: false,
            nack_data: false,
            stall_write: false,
            stall_read: false,
        }
    }

    /// Data bytes written to the target, with handshakes stripped
    pub fn written(&self) -> Vec<u8, 64> {
        let mut bytes = Vec::new();
        for event in &self.wire {
            if let WireEvent::Write(b) = event {
                bytes.push(*b).unwrap();
            }
        }
        bytes
    }
}

impl TwiPeripheral for FakeTwi {
    fn start(&mut self, address_byte: u8) {
        self.wire.push(WireEvent::Start(address_byte)).unwrap();
    }

    fn write_complete(&self) -> bool {
        !self.stall_write
    }

    fn read_complete(&self) -> bool {
        !self.stall_read
    }

    fn nack_received(&self) -> bool {
        // The acknowledge bit reflects whatever phase finished last
        match self.wire.last() {
            Some(WireEvent::Start(byte)) => {
                self.nack_address || (byte & 0x01 != 0 && self.nack_read_address)
            }
            Some(WireEvent::Write(_)) => self.nack_data,
            _ => false,
        }
    }

    fn read_data(&mut self) -> u8 {
        let byte = *self.rx.get(self.rx_pos).expect("rx script exhausted");
        self.rx_pos += 1;
        byte
    }

    fn write_data(&mut self, byte: u8) {
        self.wire.push(WireEvent::Write(byte)).unwrap();
    }

    fn issue(&mut self, command: BusCommand) {
        self.wire.push(WireEvent::Command(command)).unwrap();
    }
}
