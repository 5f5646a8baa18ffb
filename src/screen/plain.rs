//! Plain text screen implementation.
//!
//! All methods return empty strings so output stays readable when piped.

use super::{Color, Screen};

/// Plain text screen implementation (no ANSI support).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainScreen;

impl PlainScreen {
    /// Create a new plain screen.
    pub fn new() -> Self {
        Self
    }
}

impl Screen for PlainScreen {
    fn fg(&self, _color: Color) -> String {
        String::new()
    }

    fn bold(&self) -> String {
        String::new()
    }

    fn dim(&self) -> String {
        String::new()
    }

    fn italic(&self) -> String {
        String::new()
    }

    fn reset(&self) -> String {
        String::new()
    }

    fn is_ansi_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_is_empty() {
        let screen = PlainScreen::new();
        assert!(screen.fg(Color::Red).is_empty());
        assert!(screen.bold().is_empty());
        assert!(screen.dim().is_empty());
        assert!(screen.italic().is_empty());
        assert!(screen.reset().is_empty());
        assert_eq!(screen.bold_text("title"), "title");
    }
}
