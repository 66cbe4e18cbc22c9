//! Input simulation and browser collaborators.

use std::time::Duration;

use crate::error::InputError;

/// Simulates pointer and keyboard input.
///
/// All methods block until the simulated input has been delivered.
pub trait InputDriver: Send {
    /// Move the pointer to absolute screen coordinates.
    fn move_pointer(&mut self, x: i32, y: i32) -> Result<(), InputError>;

    /// Press and release the primary mouse button.
    fn primary_click(&mut self) -> Result<(), InputError>;

    /// Type text one character at a time, pausing `interval` between characters.
    fn type_text(&mut self, text: &str, interval: Duration) -> Result<(), InputError>;

    /// Scroll vertically. Positive values scroll down, negative values scroll up.
    fn scroll(&mut self, notches: i32) -> Result<(), InputError>;

    /// Press a key combination such as `["ctrl", "shift", "tab"]`.
    ///
    /// Leading keys are held as modifiers while the last key is clicked.
    fn hotkey(&mut self, keys: &[&str]) -> Result<(), InputError>;
}

/// Opens URLs in a browser.
pub trait BrowserLauncher: Send + Sync {
    fn open_url(&self, url: &str) -> Result<(), InputError>;
}
