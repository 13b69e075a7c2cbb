//! Screen buffer and reading renderer
//!
//! The panel is a 20x4 character display. A `Screen` is one full frame of
//! text, built fresh each cycle and handed to the display driver by
//! reference; nothing here is shared or reused across cycles.

use core::fmt::Write as _;

use heapless::String;

use crate::reading::SensorReading;

/// Number of text rows on the panel
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 20;

/// A full frame of display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
}

impl Screen {
    /// Create a new blank screen
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new(), String::new(), String::new()],
        }
    }

    /// Blank every line
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set text at a specific row
    ///
    /// Text longer than the panel is wide is truncated; rows past the
    /// bottom are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < self.lines.len() {
            self.lines[row].clear();
            let _ = self.lines[row].push_str(&text[..text.len().min(SCREEN_COLS)]);
        }
    }

    /// Get a line of text
    pub fn line(&self, row: usize) -> &str {
        if row < self.lines.len() {
            self.lines[row].as_str()
        } else {
            ""
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the frame for one sensor reading.
pub fn render_reading(reading: &SensorReading) -> Screen {
    let mut screen = Screen::new();
    screen.set_line(0, "Air Quality Data:");

    let mut line: String<SCREEN_COLS> = String::new();
    let _ = write!(line, "CO2 Levels: {}ppm", reading.co2_ppm);
    screen.set_line(1, &line);

    line.clear();
    let _ = write!(line, "Temperature: {:.1}C", reading.temperature_celsius);
    screen.set_line(2, &line);

    line.clear();
    let _ = write!(
        line,
        "Rel. Humidity: {:.0}%",
        reading.relative_humidity_percent
    );
    screen.set_line(3, &line);

    screen
}
