//! SerLCD 20x4 character display
//!
//! SparkFun's serial LCD takes a plain character stream: printable bytes
//! advance the cursor and wrap line by line, and a `'|'` escape prefixes
//! setting commands. A full frame is exactly 80 characters, so the driver
//! streams every update as one chip-select window with each line padded
//! out to the panel width.

use aither_core::screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
use aither_core::traits::{DisplayError, TextDisplay};
use aither_hal::gpio::OutputPin;
use aither_hal::spi::{Mode, SpiTx};
use heapless::Vec;

/// Escape byte introducing a setting command
const SETTING_MODE: u8 = b'|';

/// Clear-display command (follows the escape byte)
const CLEAR_DISPLAY: u8 = b'-';

/// Bytes in one full frame
const FRAME_LEN: usize = SCREEN_ROWS * SCREEN_COLS;

/// The SPI clock mode the panel expects
pub const SPI_MODE: Mode = Mode::Mode1;

/// SerLCD driver over a blocking SPI transmitter and a chip-select pin
pub struct SerLcd<S, CS> {
    spi: S,
    cs: CS,
}

impl<S: SpiTx, CS: OutputPin> SerLcd<S, CS> {
    /// Create a driver, leaving the panel deselected
    pub fn new(spi: S, cs: CS) -> Self {
        let mut lcd = Self { spi, cs };
        lcd.cs.set_high();
        lcd
    }

    /// Tear down, handing the bus and pin back
    pub fn release(self) -> (S, CS) {
        (self.spi, self.cs)
    }

    /// Run one selected transfer window, releasing chip select on every
    /// exit path.
    fn with_selected(&mut self, f: impl FnOnce(&mut S) -> Result<(), S::Error>) -> Result<(), DisplayError> {
        self.cs.set_low();
        let result = f(&mut self.spi);
        self.cs.set_high();
        result.map_err(|_| DisplayError::Transmit)
    }
}

impl<S: SpiTx, CS: OutputPin> TextDisplay for SerLcd<S, CS> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.with_selected(|spi| spi.write(&[SETTING_MODE, CLEAR_DISPLAY]))
    }

    fn update(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        let mut frame: Vec<u8, FRAME_LEN> = Vec::new();
        for row in 0..SCREEN_ROWS {
            let text = screen.line(row).as_bytes();
            let shown = &text[..text.len().min(SCREEN_COLS)];
            let _ = frame.extend_from_slice(shown);
            for _ in shown.len()..SCREEN_COLS {
                let _ = frame.push(b' ');
            }
        }
        self.with_selected(|spi| spi.write(&frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SPI transmitter that records the byte stream
    struct FakeSpi {
        sent: Vec<u8, 128>,
        fail: bool,
    }

    impl FakeSpi {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                fail: false,
            }
        }
    }

    impl SpiTx for FakeSpi {
        type Error = ();

        fn write_byte(&mut self, byte: u8) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.sent.push(byte).unwrap();
            Ok(())
        }
    }

    /// Chip-select pin that remembers its level
    struct FakePin {
        high: bool,
        edges: u32,
    }

    impl FakePin {
        fn new() -> Self {
            Self {
                high: false,
                edges: 0,
            }
        }
    }

    impl OutputPin for FakePin {
        fn set_high(&mut self) {
            self.high = true;
            self.edges += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.edges += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_new_deselects_the_panel() {
        let lcd = SerLcd::new(FakeSpi::new(), FakePin::new());
        let (_, cs) = lcd.release();
        assert!(cs.is_set_high());
    }

    #[test]
    fn test_clear_sends_the_setting_escape() {
        let mut lcd = SerLcd::new(FakeSpi::new(), FakePin::new());
        lcd.clear().unwrap();

        let (spi, cs) = lcd.release();
        assert_eq!(spi.sent.as_slice(), b"|-");
        assert!(cs.is_set_high());
    }

    #[test]
    fn test_update_streams_a_padded_80_byte_frame() {
        let mut screen = Screen::new();
        screen.set_line(0, "Air Quality Data:");
        screen.set_line(1, "CO2 Levels: 400ppm");

        let mut lcd = SerLcd::new(FakeSpi::new(), FakePin::new());
        lcd.update(&screen).unwrap();

        let (spi, _) = lcd.release();
        assert_eq!(spi.sent.len(), FRAME_LEN);
        assert_eq!(&spi.sent[..20], b"Air Quality Data:   ");
        assert_eq!(&spi.sent[20..40], b"CO2 Levels: 400ppm  ");
        // Unset rows come out as blanks
        assert!(spi.sent[40..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn test_chip_select_released_after_failed_transfer() {
        let mut spi = FakeSpi::new();
        spi.fail = true;
        let mut lcd = SerLcd::new(spi, FakePin::new());

        assert_eq!(lcd.clear(), Err(DisplayError::Transmit));

        let (_, cs) = lcd.release();
        assert!(cs.is_set_high());
    }
}
