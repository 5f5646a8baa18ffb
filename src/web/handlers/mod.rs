//! API handlers for the Code Museum server.

pub mod auth;
pub mod health;
pub mod snippets;

pub use auth::*;
pub use health::*;
pub use snippets::*;

use crate::db::Database;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle with its connection pool.
    pub db: Database,
    /// Count likes without an acting user (legacy behavior).
    pub anonymous_likes: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            anonymous_likes: false,
        }
    }

    /// Enable or disable anonymous likes.
    pub fn with_anonymous_likes(mut self, enabled: bool) -> Self {
        self.anonymous_likes = enabled;
        self
    }
}
