//! Snippet model for Code Museum.
//!
//! This module defines the Snippet struct and the Category enum offered by
//! the client. The server stores the category as free text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{MuseumError, Result};

/// Sentinel category used by the client to mean "no filter".
pub const CATEGORY_ALL: &str = "All";

/// Snippet classification offered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// A fix for a memorable bug.
    #[default]
    BugFix,
    /// An elegant solution.
    Elegant,
    /// A clever hack.
    Hack,
    /// A performance optimization.
    Optimization,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::BugFix,
        Category::Elegant,
        Category::Hack,
        Category::Optimization,
    ];

    /// Convert category to its stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BugFix => "Bug Fix",
            Category::Elegant => "Elegant",
            Category::Hack => "Hack",
            Category::Optimization => "Optimization",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the stored form ("Bug Fix") as well as command-line friendly
    /// spellings ("bug-fix", "bugfix").
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "bugfix" => Ok(Category::BugFix),
            "elegant" => Ok(Category::Elegant),
            "hack" => Ok(Category::Hack),
            "optimization" => Ok(Category::Optimization),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// Normalize a category filter value: `None`, empty and "All" mean no filter.
pub fn category_filter(raw: Option<&str>) -> Option<&str> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(CATEGORY_ALL) => None,
        Some(category) => Some(category),
    }
}

/// Snippet entity as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Snippet {
    /// Unique snippet ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Category label, normally one of [`Category`].
    pub category: String,
    /// Programming language (free text).
    pub language: String,
    /// The story behind the code.
    pub story: String,
    /// The code ("after" code when `before_code` is present).
    pub code: String,
    /// Optional code before the fix.
    #[serde(default)]
    pub before_code: Option<String>,
    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display name of the author.
    pub author: String,
    /// Owning user.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// View counter.
    #[serde(default)]
    pub views: i64,
    /// Like counter.
    #[serde(default)]
    pub likes: i64,
    /// Comment counter.
    #[serde(default)]
    pub comments: i64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

impl Snippet {
    /// The category as a known [`Category`], if it is one.
    pub fn category_kind(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Whether a non-empty "before" code block exists.
    pub fn has_before_code(&self) -> bool {
        self.before_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    }

    /// Case-insensitive substring match against title, story and tags.
    ///
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.story.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

/// Row type for snippets from the database; tags are stored as JSON text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SnippetRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub language: String,
    pub story: String,
    pub code: String,
    pub before_code: Option<String>,
    pub tags: String,
    pub author: String,
    pub user_id: Option<i64>,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub created_at: String,
}

/// Column list matching [`SnippetRow`].
pub(crate) const SNIPPET_COLUMNS: &str = "id, title, category, language, story, code, before_code, \
     tags, author, user_id, views, likes, comments, created_at";

impl SnippetRow {
    pub(crate) fn into_snippet(self) -> Result<Snippet> {
        let tags: Vec<String> = if self.tags.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&self.tags).map_err(MuseumError::Serialization)?
        };

        Ok(Snippet {
            id: self.id,
            title: self.title,
            category: self.category,
            language: self.language,
            story: self.story,
            code: self.code,
            before_code: self.before_code,
            tags,
            author: self.author,
            user_id: self.user_id,
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            created_at: self.created_at,
        })
    }
}

/// Data for creating a new snippet.
#[derive(Debug, Clone, Default)]
pub struct NewSnippet {
    /// Title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Programming language.
    pub language: String,
    /// The story.
    pub story: String,
    /// The code.
    pub code: String,
    /// Optional code before the fix.
    pub before_code: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Author display name.
    pub author: String,
    /// Acting user. Must exist.
    pub user_id: Option<i64>,
}

impl NewSnippet {
    /// Create a new snippet with the required text fields.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        language: impl Into<String>,
        story: impl Into<String>,
        code: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            language: language.into(),
            story: story.into(),
            code: code.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// Set the "before" code.
    pub fn with_before_code(mut self, before: impl Into<String>) -> Self {
        self.before_code = Some(before.into());
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the acting user.
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Names of required text fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("category", &self.category),
            ("language", &self.language),
            ("story", &self.story),
            ("code", &self.code),
            ("author", &self.author),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snippet {
        Snippet {
            id: 1,
            title: "The Null Pointer".to_string(),
            category: "Bug Fix".to_string(),
            language: "JavaScript".to_string(),
            story: "Three sleepless nights".to_string(),
            code: "a?.b".to_string(),
            before_code: Some("a.b".to_string()),
            tags: vec!["Debugging".to_string(), "javascript".to_string()],
            author: "Sarah".to_string(),
            user_id: Some(1),
            views: 0,
            likes: 0,
            comments: 0,
            created_at: "2024-11-15 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_category_round_trip_and_aliases() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("bug-fix".parse::<Category>().unwrap(), Category::BugFix);
        assert_eq!("OPTIMIZATION".parse::<Category>().unwrap(), Category::Optimization);
        assert!("Refactor".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_filter_sentinels() {
        assert_eq!(category_filter(None), None);
        assert_eq!(category_filter(Some("")), None);
        assert_eq!(category_filter(Some("All")), None);
        assert_eq!(category_filter(Some("Bug Fix")), Some("Bug Fix"));
    }

    #[test]
    fn test_matches_search() {
        let snippet = sample();
        assert!(snippet.matches_search(""));
        assert!(snippet.matches_search("null"));
        assert!(snippet.matches_search("SLEEPLESS"));
        assert!(snippet.matches_search("debug"));
        assert!(!snippet.matches_search("rust"));
    }

    #[test]
    fn test_has_before_code() {
        let mut snippet = sample();
        assert!(snippet.has_before_code());
        snippet.before_code = Some("   ".to_string());
        assert!(!snippet.has_before_code());
        snippet.before_code = None;
        assert!(!snippet.has_before_code());
    }

    #[test]
    fn test_unknown_category_kind() {
        let mut snippet = sample();
        assert_eq!(snippet.category_kind(), Some(Category::BugFix));
        snippet.category = "Whatever".to_string();
        assert_eq!(snippet.category_kind(), None);
    }

    #[test]
    fn test_row_conversion_parses_tags() {
        let row = SnippetRow {
            id: 3,
            title: "t".into(),
            category: "Hack".into(),
            language: "Rust".into(),
            story: "s".into(),
            code: "c".into(),
            before_code: None,
            tags: r#"["a","b"]"#.into(),
            author: "x".into(),
            user_id: Some(2),
            views: 4,
            likes: 5,
            comments: 6,
            created_at: "2024-01-01 00:00:00".into(),
        };
        let snippet = row.into_snippet().unwrap();
        assert_eq!(snippet.tags, vec!["a", "b"]);
        assert_eq!(snippet.likes, 5);
    }

    #[test]
    fn test_deserialize_minimal_snippet() {
        let json = r#"{"id":1,"title":"t","category":"Hack","language":"Go",
            "story":"s","code":"c","author":"a"}"#;
        let snippet: Snippet = serde_json::from_str(json).unwrap();
        assert!(snippet.tags.is_empty());
        assert_eq!(snippet.user_id, None);
        assert_eq!(snippet.views, 0);
    }

    #[test]
    fn test_missing_fields() {
        let snippet = NewSnippet::new("t", "Hack", "Go", " ", "", "a");
        assert_eq!(snippet.missing_fields(), vec!["story", "code"]);
        let complete = NewSnippet::new("t", "Hack", "Go", "s", "c", "a");
        assert!(complete.missing_fields().is_empty());
    }
}
