//! User repository for Code Museum.
//!
//! Users are created by signup and afterwards only read: by login, and by
//! the acting-user existence checks on mutating requests.

use sqlx::Executor;

use super::user::{NewUser, User, UserIdentity};
use super::{DbKind, DbPool};
use crate::{MuseumError, Result};

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id = Self::insert(self.pool, new_user).await?;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| MuseumError::NotFound("user".to_string()))
    }

    /// Insert a user through any executor and return the new ID.
    pub async fn insert<'e, E>(executor: E, new_user: &NewUser) -> Result<i64>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .fetch_one(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                MuseumError::Validation("User already exists".to_string())
            }
            e => MuseumError::Database(e.to_string()),
        })?;
        Ok(id)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(user)
    }

    /// Check whether a user with this ID exists, through any executor.
    pub async fn exists_with<'e, E>(executor: E, id: i64) -> Result<bool>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
            .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(exists)
    }

    /// Check whether the email or the username is already registered, through any executor.
    pub async fn identity_taken_with<'e, E>(executor: E, email: &str, username: &str) -> Result<bool>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR username = $2)",
        )
        .bind(email)
        .bind(username)
        .fetch_one(executor)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(taken)
    }

    /// Find the identity matching an exact email and password pair.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserIdentity>> {
        let identity = sqlx::query_as::<_, UserIdentity>(
            "SELECT id, username, email FROM users WHERE email = $1 AND password = $2",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(identity)
    }
}
