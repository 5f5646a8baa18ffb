//! Comment repository for Code Museum.

use sqlx::Executor;

use super::comment::{Comment, NewComment};
use crate::db::{DbKind, DbPool};
use crate::{MuseumError, Result};

const COMMENT_COLUMNS: &str = "id, snippet_id, user_id, username, comment_text, created_at";

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List the comments of a snippet, newest first.
    pub async fn list_by_snippet(&self, snippet_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE snippet_id = $1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(snippet_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(comments)
    }

    /// Insert a comment through any executor and return the stored row.
    ///
    /// Does not touch the snippet's comment counter.
    pub async fn insert_with<'e, E>(executor: E, new_comment: &NewComment) -> Result<Comment>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (snippet_id, user_id, username, comment_text)
             VALUES ($1, $2, $3, $4)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(new_comment.snippet_id)
        .bind(new_comment.user_id)
        .bind(&new_comment.username)
        .bind(&new_comment.comment_text)
        .fetch_one(executor)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(comment)
    }
}
