//! Snippet repository for Code Museum.
//!
//! Snippets are inserted once and afterwards only their engagement counters
//! change. Writes that are part of a larger unit of work take an executor so
//! they can run inside the caller's transaction.

use sqlx::{Executor, QueryBuilder};

use super::types::{category_filter, NewSnippet, Snippet, SnippetRow, SNIPPET_COLUMNS};
use crate::db::{DbKind, DbPool};
use crate::{MuseumError, Result};

/// Engagement counter columns on a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Detail opens.
    Views,
    /// Likes.
    Likes,
    /// Comment count.
    Comments,
}

impl Counter {
    /// Column name of the counter.
    pub fn column(&self) -> &'static str {
        match self {
            Counter::Views => "views",
            Counter::Likes => "likes",
            Counter::Comments => "comments",
        }
    }
}

/// Repository for snippet operations.
pub struct SnippetRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SnippetRepository<'a> {
    /// Create a new SnippetRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List snippets newest first, optionally restricted to one category.
    ///
    /// An empty category or the "All" sentinel means no filter.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Snippet>> {
        let mut query: QueryBuilder<DbKind> =
            QueryBuilder::new(format!("SELECT {SNIPPET_COLUMNS} FROM snippets"));

        if let Some(category) = category_filter(category) {
            query.push(" WHERE category = ");
            query.push_bind(category);
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<SnippetRow> = query
            .build_query_as()
            .fetch_all(self.pool)
            .await
            .map_err(|e| MuseumError::Database(e.to_string()))?;

        rows.into_iter().map(SnippetRow::into_snippet).collect()
    }

    /// Check whether a snippet exists, through any executor.
    pub async fn exists_with<'e, E>(executor: E, id: i64) -> Result<bool>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM snippets WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await
                .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(exists)
    }

    /// Insert a snippet through any executor and return the stored row.
    pub async fn insert_with<'e, E>(executor: E, new_snippet: &NewSnippet) -> Result<Snippet>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let tags = serde_json::to_string(&new_snippet.tags)?;

        let row: SnippetRow = sqlx::query_as(&format!(
            "INSERT INTO snippets (title, category, language, story, code, before_code, tags, author, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {SNIPPET_COLUMNS}"
        ))
        .bind(&new_snippet.title)
        .bind(&new_snippet.category)
        .bind(&new_snippet.language)
        .bind(&new_snippet.story)
        .bind(&new_snippet.code)
        .bind(&new_snippet.before_code)
        .bind(tags)
        .bind(&new_snippet.author)
        .bind(new_snippet.user_id)
        .fetch_one(executor)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;

        row.into_snippet()
    }

    /// Increment a counter by one and return the new value.
    ///
    /// Returns `None` if the snippet does not exist.
    pub async fn increment(&self, id: i64, counter: Counter) -> Result<Option<i64>> {
        Self::increment_with(self.pool, id, counter).await
    }

    /// Increment a counter by one through any executor and return the new value.
    pub async fn increment_with<'e, E>(executor: E, id: i64, counter: Counter) -> Result<Option<i64>>
    where
        E: Executor<'e, Database = DbKind>,
    {
        let column = counter.column();
        let value: Option<i64> = sqlx::query_scalar(&format!(
            "UPDATE snippets SET {column} = {column} + 1 WHERE id = $1 RETURNING {column}"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| MuseumError::Database(e.to_string()))?;
        Ok(value)
    }
}
