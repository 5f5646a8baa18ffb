//! Login for Code Museum.

use tracing::{debug, info};

use crate::db::{Database, UserIdentity, UserRepository};
use crate::{MuseumError, Result};

/// Log in by exact email and password match.
///
/// No session is issued; the caller keeps the returned identity and sends
/// its id as `user_id` with later requests.
pub async fn login(db: &Database, email: &str, password: &str) -> Result<UserIdentity> {
    let identity = UserRepository::new(db.pool())
        .find_by_credentials(email, password)
        .await?;

    match identity {
        Some(identity) => {
            info!(user_id = identity.id, "user logged in");
            Ok(identity)
        }
        None => {
            debug!("login rejected");
            Err(MuseumError::Auth("Invalid credentials".to_string()))
        }
    }
}
