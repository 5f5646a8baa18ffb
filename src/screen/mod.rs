//! Terminal decoration for the client.
//!
//! Provides ANSI escape sequences for colored output and a plain text
//! fallback for pipes and terminals without color.

mod ansi;
mod plain;

pub use ansi::AnsiScreen;
pub use plain::PlainScreen;

/// Terminal colors (ANSI standard 8 colors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Black (color code 0).
    Black = 0,
    /// Red (color code 1).
    Red = 1,
    /// Green (color code 2).
    Green = 2,
    /// Yellow (color code 3).
    Yellow = 3,
    /// Blue (color code 4).
    Blue = 4,
    /// Magenta (color code 5).
    Magenta = 5,
    /// Cyan (color code 6).
    Cyan = 6,
    /// White (color code 7).
    White = 7,
}

impl Color {
    /// Get the ANSI color code for foreground.
    pub fn fg_code(self) -> u8 {
        30 + self as u8
    }
}

/// Screen output trait for terminal decoration.
///
/// Implementations include `AnsiScreen` for color terminals and
/// `PlainScreen`, which emits no control sequences at all.
pub trait Screen: Send + Sync {
    /// Set foreground (text) color.
    fn fg(&self, color: Color) -> String;

    /// Enable bold text.
    fn bold(&self) -> String;

    /// Enable dim (faint) text.
    fn dim(&self) -> String;

    /// Enable italic text.
    fn italic(&self) -> String;

    /// Reset all text attributes to default.
    fn reset(&self) -> String;

    /// Check if ANSI escape sequences are enabled.
    fn is_ansi_enabled(&self) -> bool;

    /// Format text with a foreground color.
    fn color_text(&self, text: &str, color: Color) -> String {
        format!("{}{}{}", self.fg(color), text, self.reset())
    }

    /// Format text as bold.
    fn bold_text(&self, text: &str) -> String {
        format!("{}{}{}", self.bold(), text, self.reset())
    }

    /// Format text as dim.
    fn dim_text(&self, text: &str) -> String {
        format!("{}{}{}", self.dim(), text, self.reset())
    }

    /// Format text as dim italic, used for code comments.
    fn comment_text(&self, text: &str) -> String {
        format!("{}{}{}{}", self.dim(), self.italic(), text, self.reset())
    }
}

/// Create a screen instance based on ANSI support.
///
/// # Example
///
/// ```
/// use code_museum::screen::{create_screen, Color};
///
/// let screen = create_screen(true);
/// assert!(screen.is_ansi_enabled());
/// assert!(!screen.fg(Color::Red).is_empty());
///
/// let plain = create_screen(false);
/// assert!(!plain.is_ansi_enabled());
/// assert!(plain.fg(Color::Red).is_empty());
/// ```
pub fn create_screen(ansi_enabled: bool) -> Box<dyn Screen> {
    if ansi_enabled {
        Box::new(AnsiScreen)
    } else {
        Box::new(PlainScreen)
    }
}
