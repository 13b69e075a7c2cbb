//! Text display trait

use crate::screen::Screen;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Transmit to the panel failed
    Transmit,
}

/// Trait for line-oriented character displays
///
/// The display is a dumb sink: it either wipes itself or swallows a whole
/// screen of text. Cursor movement and partial updates stay inside the
/// driver.
pub trait TextDisplay {
    /// Clear the panel
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Replace the panel contents with the given screen
    fn update(&mut self, screen: &Screen) -> Result<(), DisplayError>;
}
