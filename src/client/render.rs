//! Text rendering of snippets, comments and the account page.

use std::fmt::Write;

use crate::db::UserIdentity;
use crate::datetime::{format_date, format_datetime};
use crate::screen::{Color, Screen};
use crate::snippet::{Category, Comment, Snippet};

use super::highlight::highlight;
use super::store::AccountSummary;

const RULE_WIDTH: usize = 60;

/// Accent color of a category label. Unknown categories are white.
pub fn category_color(category: &str) -> Color {
    match category.parse::<Category>() {
        Ok(Category::BugFix) => Color::Red,
        Ok(Category::Elegant) => Color::Cyan,
        Ok(Category::Hack) => Color::Yellow,
        Ok(Category::Optimization) => Color::Magenta,
        Err(_) => Color::White,
    }
}

fn rule(screen: &dyn Screen) -> String {
    screen.dim_text(&"-".repeat(RULE_WIDTH))
}

fn stats_line(snippet: &Snippet, liked: bool) -> String {
    let heart = if liked { "♥" } else { "♡" };
    format!(
        "{} {}  👁 {}  💬 {}",
        heart, snippet.likes, snippet.views, snippet.comments
    )
}

/// One-entry summary of a snippet as shown in the list.
pub fn render_card(screen: &dyn Screen, snippet: &Snippet, liked: bool, timezone: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        screen.dim_text(&format!("#{}", snippet.id)),
        screen.bold_text(&snippet.title),
        screen.color_text(
            &format!("[{}]", snippet.category),
            category_color(&snippet.category)
        ),
    );
    let _ = writeln!(
        out,
        "   {} · by {} · {}",
        snippet.language,
        snippet.author,
        format_date(&snippet.created_at, timezone)
    );
    let _ = writeln!(out, "   {}", snippet.story);
    if !snippet.tags.is_empty() {
        let tags: Vec<String> = snippet.tags.iter().map(|t| format!("#{t}")).collect();
        let _ = writeln!(out, "   {}", screen.color_text(&tags.join(" "), Color::Blue));
    }
    let _ = writeln!(out, "   {}", stats_line(snippet, liked));
    out
}

/// The snippet list, or a notice when nothing matches.
pub fn render_list(
    screen: &dyn Screen,
    snippets: &[&Snippet],
    is_liked: impl Fn(i64) -> bool,
    timezone: &str,
) -> String {
    if snippets.is_empty() {
        return format!(
            "{}\n",
            screen.dim_text("No snippets found matching your criteria")
        );
    }
    snippets
        .iter()
        .map(|s| render_card(screen, s, is_liked(s.id), timezone))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A labelled, highlighted code block.
pub fn render_code_block(screen: &dyn Screen, label: &str, language: &str, code: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        screen.bold_text(label),
        screen.dim_text(&format!("({language})"))
    );
    let _ = writeln!(out, "{}", rule(screen));
    for line in highlight(code, screen).lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out, "{}", rule(screen));
    out
}

/// Full snippet detail with its code and comments.
pub fn render_detail(
    screen: &dyn Screen,
    snippet: &Snippet,
    comments: &[Comment],
    liked: bool,
    timezone: &str,
) -> String {
    let mut out = render_card(screen, snippet, liked, timezone);
    out.push('\n');
    match snippet.before_code.as_deref() {
        Some(before) if snippet.has_before_code() => {
            out.push_str(&render_code_block(screen, "Before", &snippet.language, before));
            out.push_str(&render_code_block(screen, "After", &snippet.language, &snippet.code));
        }
        _ => out.push_str(&render_code_block(screen, "Code", &snippet.language, &snippet.code)),
    }
    out.push('\n');
    out.push_str(&render_comments(screen, comments, timezone));
    out
}

/// Comment thread, newest first as received.
pub fn render_comments(screen: &dyn Screen, comments: &[Comment], timezone: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", screen.bold_text(&format!("Comments ({})", comments.len())));
    if comments.is_empty() {
        let _ = writeln!(
            out,
            "  {}",
            screen.dim_text("No comments yet. Be the first to comment!")
        );
        return out;
    }
    for comment in comments {
        let _ = writeln!(
            out,
            "  {} {}",
            screen.color_text(&comment.username, Color::Cyan),
            screen.dim_text(&format_datetime(&comment.created_at, timezone))
        );
        let _ = writeln!(out, "    {}", comment.comment_text);
    }
    out
}

/// Account page: identity, totals, and the user's own snippets.
pub fn render_account(
    screen: &dyn Screen,
    user: &UserIdentity,
    summary: &AccountSummary,
    timezone: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", screen.bold_text(&user.username));
    let _ = writeln!(out, "{}", screen.dim_text(&user.email));
    let _ = writeln!(
        out,
        "Snippets: {}  Likes: {}  Views: {}",
        summary.snippets.len(),
        summary.total_likes,
        summary.total_views
    );
    out.push('\n');
    if summary.snippets.is_empty() {
        let _ = writeln!(out, "{}", screen.dim_text("You haven't shared any snippets yet"));
        return out;
    }
    for snippet in &summary.snippets {
        out.push_str(&render_card(screen, snippet, false, timezone));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::PlainScreen;

    fn snippet(before: Option<&str>) -> Snippet {
        Snippet {
            id: 7,
            title: "Off By One".to_string(),
            category: "Bug Fix".to_string(),
            language: "Rust".to_string(),
            story: "The loop ran once too often.".to_string(),
            code: "for i in 0..n {}".to_string(),
            before_code: before.map(str::to_string),
            tags: vec!["loops".to_string(), "rust".to_string()],
            author: "ada".to_string(),
            user_id: Some(1),
            views: 12,
            likes: 3,
            comments: 1,
            created_at: "2024-11-15 10:00:00".to_string(),
        }
    }

    fn comment() -> Comment {
        Comment {
            id: 1,
            snippet_id: 7,
            user_id: Some(1),
            username: "bob".to_string(),
            comment_text: "Classic.".to_string(),
            created_at: "2024-11-16 08:30:00".to_string(),
        }
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(category_color("Bug Fix"), Color::Red);
        assert_eq!(category_color("Elegant"), Color::Cyan);
        assert_eq!(category_color("Hack"), Color::Yellow);
        assert_eq!(category_color("Optimization"), Color::Magenta);
        assert_eq!(category_color("Refactor"), Color::White);
    }

    #[test]
    fn test_card_contents() {
        let out = render_card(&PlainScreen, &snippet(None), true, "UTC");
        assert!(out.contains("#7 Off By One [Bug Fix]"));
        assert!(out.contains("by ada"));
        assert!(out.contains("Nov 15, 2024"));
        assert!(out.contains("#loops #rust"));
        assert!(out.contains("♥ 3"));
    }

    #[test]
    fn test_empty_list_message() {
        let out = render_list(&PlainScreen, &[], |_| false, "UTC");
        assert_eq!(out, "No snippets found matching your criteria\n");
    }

    #[test]
    fn test_detail_before_and_after() {
        let out = render_detail(
            &PlainScreen,
            &snippet(Some("for i in 0..=n {}")),
            &[comment()],
            false,
            "UTC",
        );
        assert!(out.contains("Before (Rust)"));
        assert!(out.contains("After (Rust)"));
        assert!(!out.contains("Code (Rust)"));
        assert!(out.contains("Comments (1)"));
        assert!(out.contains("Classic."));
    }

    #[test]
    fn test_detail_single_block_for_blank_before() {
        let out = render_detail(&PlainScreen, &snippet(Some("  ")), &[], false, "UTC");
        assert!(out.contains("Code (Rust)"));
        assert!(!out.contains("Before"));
        assert!(out.contains("No comments yet. Be the first to comment!"));
    }

    #[test]
    fn test_account_without_snippets() {
        let user = UserIdentity {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let summary = AccountSummary {
            snippets: Vec::new(),
            total_likes: 0,
            total_views: 0,
        };
        let out = render_account(&PlainScreen, &user, &summary, "UTC");
        assert!(out.contains("Snippets: 0  Likes: 0  Views: 0"));
        assert!(out.contains("You haven't shared any snippets yet"));
    }
}
