//! Lightweight code highlighting for terminal output.
//!
//! Recognizes a fixed keyword set, quoted strings, and `//` line comments.
//! Everything else is plain text. The same rules apply to every language.

use crate::screen::{Color, Screen};

/// Highlighted keywords.
pub const KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "class", "import",
    "export", "from", "async", "await", "try", "catch",
];

/// Kind of a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unhighlighted text.
    Plain,
    /// A keyword from [`KEYWORDS`].
    Keyword,
    /// A quoted string literal, quotes included.
    Str,
    /// A `//` comment up to the end of the line.
    Comment,
}

/// A span of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Kind of span.
    pub kind: TokenKind,
    /// Source text of the span.
    pub text: &'a str,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find the end (exclusive byte offset) of a string literal starting at
/// `start`, or `None` if it is not closed on the same line.
fn string_end(code: &str, start: usize, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (offset, c) in code[start + quote.len_utf8()..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' => return None,
            c if c == quote => return Some(start + quote.len_utf8() + offset + c.len_utf8()),
            _ => {}
        }
    }
    None
}

fn push_plain<'a>(tokens: &mut Vec<Token<'a>>, code: &'a str, from: usize, to: usize) {
    if from < to {
        tokens.push(Token {
            kind: TokenKind::Plain,
            text: &code[from..to],
        });
    }
}

/// Split source code into highlighted spans. Concatenating the spans
/// yields the input unchanged.
pub fn tokenize(code: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < code.len() {
        let rest = &code[pos..];
        let Some(c) = rest.chars().next() else { break };

        if rest.starts_with("//") {
            let end = rest.find('\n').map_or(code.len(), |i| pos + i);
            push_plain(&mut tokens, code, plain_start, pos);
            tokens.push(Token {
                kind: TokenKind::Comment,
                text: &code[pos..end],
            });
            pos = end;
            plain_start = pos;
            continue;
        }

        if matches!(c, '\'' | '"' | '`') {
            if let Some(end) = string_end(code, pos, c) {
                push_plain(&mut tokens, code, plain_start, pos);
                tokens.push(Token {
                    kind: TokenKind::Str,
                    text: &code[pos..end],
                });
                pos = end;
                plain_start = pos;
                continue;
            }
        }

        if is_word_char(c) {
            let len = rest
                .char_indices()
                .find(|(_, ch)| !is_word_char(*ch))
                .map_or(rest.len(), |(i, _)| i);
            let word = &rest[..len];
            if KEYWORDS.contains(&word) {
                push_plain(&mut tokens, code, plain_start, pos);
                tokens.push(Token {
                    kind: TokenKind::Keyword,
                    text: word,
                });
                plain_start = pos + len;
            }
            pos += len;
            continue;
        }

        pos += c.len_utf8();
    }

    push_plain(&mut tokens, code, plain_start, code.len());
    tokens
}

/// Render source code with terminal colors.
pub fn highlight(code: &str, screen: &dyn Screen) -> String {
    tokenize(code)
        .into_iter()
        .map(|token| match token.kind {
            TokenKind::Plain => token.text.to_string(),
            TokenKind::Keyword => format!(
                "{}{}{}{}",
                screen.bold(),
                screen.fg(Color::Magenta),
                token.text,
                screen.reset()
            ),
            TokenKind::Str => screen.color_text(token.text, Color::Green),
            TokenKind::Comment => screen.comment_text(token.text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{AnsiScreen, PlainScreen};

    fn kinds(code: &str) -> Vec<(TokenKind, &str)> {
        tokenize(code).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert_eq!(
            kinds("const constant = 1;"),
            vec![
                (TokenKind::Keyword, "const"),
                (TokenKind::Plain, " constant = 1;"),
            ]
        );
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(
            kinds(r#"x = "a \" b" + 'c'"#),
            vec![
                (TokenKind::Plain, "x = "),
                (TokenKind::Str, r#""a \" b""#),
                (TokenKind::Plain, " + "),
                (TokenKind::Str, "'c'"),
            ]
        );
    }

    #[test]
    fn test_unclosed_string_is_plain() {
        assert_eq!(kinds("it's\nfine"), vec![(TokenKind::Plain, "it's\nfine")]);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("return x; // done\nlet y"),
            vec![
                (TokenKind::Keyword, "return"),
                (TokenKind::Plain, " x; "),
                (TokenKind::Comment, "// done"),
                (TokenKind::Plain, "\n"),
                (TokenKind::Keyword, "let"),
                (TokenKind::Plain, " y"),
            ]
        );
    }

    #[test]
    fn test_comment_marker_inside_string() {
        assert_eq!(
            kinds(r#"url = "http://x""#),
            vec![(TokenKind::Plain, "url = "), (TokenKind::Str, r#""http://x""#)]
        );
    }

    #[test]
    fn test_tokens_reassemble_input() {
        let code = "const userName = user?.profile?.name || 'Anonymous'; // ünïcode\n";
        let joined: String = tokenize(code).iter().map(|t| t.text).collect();
        assert_eq!(joined, code);
    }

    #[test]
    fn test_highlight_plain_screen_is_identity() {
        let code = "async function f() { await g(); }";
        assert_eq!(highlight(code, &PlainScreen), code);
    }

    #[test]
    fn test_highlight_ansi_colors_keywords() {
        let out = highlight("let", &AnsiScreen);
        assert_eq!(out, "\x1b[1m\x1b[35mlet\x1b[0m");
    }
}
