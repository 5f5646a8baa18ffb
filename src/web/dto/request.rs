//! Request DTOs for the Web API.
//!
//! Text fields default to empty so that a missing field and an empty one
//! are reported the same way, as a 400 with the endpoint's message.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::not_empty_trimmed;
use crate::snippet::NewSnippet;

/// Query parameters for listing snippets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSnippetsQuery {
    /// Category filter. Empty or "All" means no filter.
    pub category: Option<String>,
    /// Accepted for compatibility; search is applied by the client.
    pub search: Option<String>,
}

/// Signup request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields required"))]
    pub username: String,
    /// Email address.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields required"))]
    pub password: String,
}

/// Login request. Missing fields simply fail to match.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Like request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LikeRequest {
    /// Acting user.
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Comment creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Acting user.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Display name of the commenter.
    #[serde(default)]
    #[validate(custom(
        function = "not_empty_trimmed",
        message = "Comment text and username required"
    ))]
    pub username: String,
    /// Comment body.
    #[serde(default)]
    #[validate(custom(
        function = "not_empty_trimmed",
        message = "Comment text and username required"
    ))]
    pub comment_text: String,
}

/// Snippet creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSnippetRequest {
    /// Title.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Missing required fields"))]
    pub title: String,
    /// Category label.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Missing required fields"))]
    pub category: String,
    /// Programming language.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Missing required fields"))]
    pub language: String,
    /// The story behind the code.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Missing required fields"))]
    pub story: String,
    /// The code.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Missing required fields"))]
    pub code: String,
    /// Optional code before the fix.
    #[serde(default, alias = "before_code")]
    pub before: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Author display name.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Missing required fields"))]
    pub author: String,
    /// Acting user.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl CreateSnippetRequest {
    /// Convert into a [`NewSnippet`]. A blank `before` is dropped.
    pub fn into_new_snippet(self) -> NewSnippet {
        let mut snippet = NewSnippet::new(
            self.title,
            self.category,
            self.language,
            self.story,
            self.code,
            self.author,
        )
        .with_tags(self.tags);
        if let Some(before) = self.before.filter(|b| !b.trim().is_empty()) {
            snippet = snippet.with_before_code(before);
        }
        snippet.user_id = self.user_id;
        snippet
    }
}
