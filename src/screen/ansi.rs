//! ANSI escape sequence implementation.

use super::{Color, Screen};

/// Escape character for ANSI sequences.
const ESC: char = '\x1b';

/// ANSI-capable screen implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiScreen;

impl AnsiScreen {
    /// Create a new ANSI screen.
    pub fn new() -> Self {
        Self
    }
}

impl Screen for AnsiScreen {
    fn fg(&self, color: Color) -> String {
        format!("{ESC}[{}m", color.fg_code())
    }

    fn bold(&self) -> String {
        format!("{ESC}[1m")
    }

    fn dim(&self) -> String {
        format!("{ESC}[2m")
    }

    fn italic(&self) -> String {
        format!("{ESC}[3m")
    }

    fn reset(&self) -> String {
        format!("{ESC}[0m")
    }

    fn is_ansi_enabled(&self) -> bool {
        true
    }
}
