//! User registration for Code Museum.
//!
//! Passwords are stored exactly as submitted. This matches the login
//! contract of plain equality and must be replaced by credential hashing
//! before any production use.

use tracing::info;

use crate::db::{Database, NewUser, UserIdentity, UserRepository};
use crate::{MuseumError, Result};

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (unique).
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// Password.
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
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

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(MuseumError::Validation("All fields required".to_string()));
        }
        Ok(())
    }
}

/// Register a new user and return its public identity.
///
/// Fails with a validation error if any field is empty or if the email or
/// the username is already registered. The duplicate check and the insert
/// share one transaction; the UNIQUE constraints catch anything that slips
/// between concurrent signups.
pub async fn register(db: &Database, request: &RegistrationRequest) -> Result<UserIdentity> {
    request.validate()?;

    let mut tx = db.begin().await?;
    if UserRepository::identity_taken_with(&mut *tx, &request.email, &request.username).await? {
        return Err(MuseumError::Validation("User already exists".to_string()));
    }
    let new_user = NewUser::new(&request.username, &request.email, &request.password);
    let id = UserRepository::insert(&mut *tx, &new_user).await?;
    tx.commit().await?;

    info!(user_id = id, username = %request.username, "user registered");

    Ok(UserIdentity {
        id,
        username: request.username.clone(),
        email: request.email.clone(),
    })
}
