//! User model for Code Museum.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User entity representing a registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Username (unique).
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// Password as submitted at signup. Not hashed.
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// The public identity of this user, without the password.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public identity triple returned by signup and login.
///
/// The client keeps this in memory and on disk; its `id` is attached as
/// `user_id` to every request that needs an acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct UserIdentity {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password, stored verbatim.
    pub password: String,
}

impl NewUser {
    /// Create a new user with all required fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
