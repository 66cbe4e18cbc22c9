//! Mouse and keyboard input simulation.

use std::thread;
use std::time::Duration;

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::{debug, warn};
use voxnav_config::ExecutorConfig;
use voxnav_protocols::{InputDriver, InputError};

/// [`InputDriver`] backed by enigo.
///
/// A fresh `Enigo` connection is opened for every operation, so the driver
/// holds no platform handle between actions.
pub struct EnigoInputDriver {
    pointer_settle: Duration,
}

impl EnigoInputDriver {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            pointer_settle: config.pointer_settle(),
        }
    }

    fn enigo() -> Result<Enigo, InputError> {
        Enigo::new(&Settings::default()).map_err(|e| InputError::Failed(e.to_string()))
    }
}

impl InputDriver for EnigoInputDriver {
    fn move_pointer(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        Self::enigo()?
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| InputError::Failed(e.to_string()))?;
        thread::sleep(self.pointer_settle);
        Ok(())
    }

    fn primary_click(&mut self) -> Result<(), InputError> {
        Self::enigo()?
            .button(Button::Left, Direction::Click)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    fn type_text(&mut self, text: &str, interval: Duration) -> Result<(), InputError> {
        let mut enigo = Self::enigo()?;
        let mut buf = [0u8; 4];

        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                thread::sleep(interval);
            }
            enigo
                .text(c.encode_utf8(&mut buf))
                .map_err(|e| InputError::Failed(e.to_string()))?;
        }

        debug!(chars = text.chars().count(), "Typed text");
        Ok(())
    }

    fn scroll(&mut self, notches: i32) -> Result<(), InputError> {
        Self::enigo()?
            .scroll(notches, Axis::Vertical)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    fn hotkey(&mut self, keys: &[&str]) -> Result<(), InputError> {
        let Some((last, modifiers)) = keys.split_last() else {
            return Ok(());
        };

        let modifiers = modifiers
            .iter()
            .map(|k| parse_key(k))
            .collect::<Result<Vec<_>, _>>()?;
        let last = parse_key(last)?;
        let mut enigo = Self::enigo()?;

        let mut pressed = Vec::with_capacity(modifiers.len());
        let mut result = Ok(());
        for key in &modifiers {
            if let Err(e) = enigo.key(*key, Direction::Press) {
                result = Err(InputError::Failed(e.to_string()));
                break;
            }
            pressed.push(*key);
        }

        if result.is_ok() {
            result = enigo
                .key(last, Direction::Click)
                .map_err(|e| InputError::Failed(e.to_string()));
        }

        // Release whatever was pressed, even after a failure.
        for key in pressed.iter().rev() {
            if let Err(e) = enigo.key(*key, Direction::Release) {
                warn!(key = ?key, error = %e, "Failed to release modifier");
            }
        }

        result
    }
}

/// Parse a key name such as `ctrl`, `tab` or `a` to an enigo key.
pub(crate) fn parse_key(key: &str) -> Result<Key, InputError> {
    let k = match key.to_lowercase().as_str() {
        // Special keys
        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "escape" | "esc" => Key::Escape,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,

        // Modifiers
        "ctrl" | "control" => Key::Control,
        "alt" | "option" => Key::Alt,
        "shift" => Key::Shift,
        "meta" | "cmd" | "command" | "win" | "super" => Key::Meta,

        // Function keys
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,

        // Single character
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return Err(InputError::InvalidKey(key.to_string())),
            }
        }
    };

    Ok(k)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
