//! Comment model for Code Museum.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Comment attached to a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Owning snippet.
    pub snippet_id: i64,
    /// Commenting user.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Username at the time of commenting.
    pub username: String,
    /// Comment body.
    pub comment_text: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Target snippet.
    pub snippet_id: i64,
    /// Acting user.
    pub user_id: i64,
    /// Display name.
    pub username: String,
    /// Comment body.
    pub comment_text: String,
}

impl NewComment {
    /// Create a new comment. Text and username are trimmed.
    pub fn new(
        snippet_id: i64,
        user_id: i64,
        username: impl AsRef<str>,
        comment_text: impl AsRef<str>,
    ) -> Self {
        Self {
            snippet_id,
            user_id,
            username: username.as_ref().trim().to_string(),
            comment_text: comment_text.as_ref().trim().to_string(),
        }
    }
}
