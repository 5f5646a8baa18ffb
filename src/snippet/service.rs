//! Snippet service for Code Museum.
//!
//! High-level operations behind the snippet endpoints. Every write that
//! depends on a prior check (acting user exists, snippet exists) runs the
//! check and the write inside a single transaction.
//!
//! An unknown snippet id is not a client error here: it surfaces as an
//! internal failure, which the API reports as a generic server error.

use tracing::debug;

use crate::db::{Database, UserRepository};
use crate::{MuseumError, Result};

use super::comment::{Comment, NewComment};
use super::comment_repository::CommentRepository;
use super::repository::{Counter, SnippetRepository};
use super::types::{NewSnippet, Snippet};

fn unknown_snippet(id: i64) -> MuseumError {
    MuseumError::Database(format!("no snippet with id {id}"))
}

fn invalid_user() -> MuseumError {
    MuseumError::Auth("Invalid user".to_string())
}

/// Service for snippet, like, view, and comment operations.
pub struct SnippetService<'a> {
    db: &'a Database,
}

impl<'a> SnippetService<'a> {
    /// Create a new SnippetService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List snippets newest first, optionally filtered by category.
    pub async fn list_snippets(&self, category: Option<&str>) -> Result<Vec<Snippet>> {
        SnippetRepository::new(self.db.pool()).list(category).await
    }

    /// Record one view and return the new view count.
    ///
    /// Every call counts; there is no per-viewer deduplication.
    pub async fn record_view(&self, id: i64) -> Result<i64> {
        SnippetRepository::new(self.db.pool())
            .increment(id, Counter::Views)
            .await?
            .ok_or_else(|| unknown_snippet(id))
    }

    /// Like a snippet and return the new like count.
    ///
    /// The acting user must be given and must exist unless `allow_anonymous`
    /// is set, in which case the like is counted unconditionally.
    pub async fn like(&self, id: i64, user_id: Option<i64>, allow_anonymous: bool) -> Result<i64> {
        if allow_anonymous {
            return SnippetRepository::new(self.db.pool())
                .increment(id, Counter::Likes)
                .await?
                .ok_or_else(|| unknown_snippet(id));
        }

        let user_id = user_id
            .ok_or_else(|| MuseumError::Auth("Must be logged in to like snippets".to_string()))?;

        let mut tx = self.db.begin().await?;
        if !UserRepository::exists_with(&mut *tx, user_id).await? {
            return Err(invalid_user());
        }
        let likes = SnippetRepository::increment_with(&mut *tx, id, Counter::Likes)
            .await?
            .ok_or_else(|| unknown_snippet(id))?;
        tx.commit().await?;

        debug!(snippet_id = id, user_id, likes, "snippet liked");
        Ok(likes)
    }

    /// List the comments of a snippet, newest first.
    ///
    /// An unknown snippet simply has no comments.
    pub async fn list_comments(&self, snippet_id: i64) -> Result<Vec<Comment>> {
        CommentRepository::new(self.db.pool())
            .list_by_snippet(snippet_id)
            .await
    }

    /// Add a comment and bump the snippet's comment counter atomically.
    pub async fn add_comment(
        &self,
        snippet_id: i64,
        user_id: Option<i64>,
        username: &str,
        comment_text: &str,
    ) -> Result<Comment> {
        if comment_text.trim().is_empty() || username.trim().is_empty() {
            return Err(MuseumError::Validation(
                "Comment text and username required".to_string(),
            ));
        }
        let user_id =
            user_id.ok_or_else(|| MuseumError::Auth("Must be logged in to comment".to_string()))?;

        let new_comment = NewComment::new(snippet_id, user_id, username, comment_text);

        let mut tx = self.db.begin().await?;
        if !UserRepository::exists_with(&mut *tx, user_id).await? {
            return Err(invalid_user());
        }
        if !SnippetRepository::exists_with(&mut *tx, snippet_id).await? {
            return Err(unknown_snippet(snippet_id));
        }
        let comment = CommentRepository::insert_with(&mut *tx, &new_comment).await?;
        SnippetRepository::increment_with(&mut *tx, snippet_id, Counter::Comments)
            .await?
            .ok_or_else(|| unknown_snippet(snippet_id))?;
        tx.commit().await?;

        debug!(snippet_id, comment_id = comment.id, "comment added");
        Ok(comment)
    }

    /// Create a snippet owned by an existing user.
    pub async fn create_snippet(&self, new_snippet: &NewSnippet) -> Result<Snippet> {
        if !new_snippet.missing_fields().is_empty() {
            return Err(MuseumError::Validation("Missing required fields".to_string()));
        }
        let user_id = new_snippet.user_id.ok_or_else(|| {
            MuseumError::Auth("Must be logged in to create snippets".to_string())
        })?;

        let mut tx = self.db.begin().await?;
        if !UserRepository::exists_with(&mut *tx, user_id).await? {
            return Err(invalid_user());
        }
        let snippet = SnippetRepository::insert_with(&mut *tx, new_snippet).await?;
        tx.commit().await?;

        debug!(snippet_id = snippet.id, user_id, "snippet created");
        Ok(snippet)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::db::NewUser;

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("ada", "ada@example.com", "pw"))
            .await
            .unwrap();
        (db, user.id)
    }

    async fn stored(db: &Database, id: i64) -> Snippet {
        SnippetRepository::new(db.pool())
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.id == id)
            .unwrap()
    }

    fn new_snippet(user_id: Option<i64>) -> NewSnippet {
        let snippet = NewSnippet::new("Title", "Elegant", "Rust", "story", "code", "ada");
        match user_id {
            Some(id) => snippet.with_user(id),
            None => snippet,
        }
    }

    #[tokio::test]
    async fn test_create_snippet_and_list() {
        let (db, user_id) = setup().await;
        let service = SnippetService::new(&db);

        let created = service
            .create_snippet(&new_snippet(Some(user_id)).with_tags(["a"]))
            .await
            .unwrap();
        assert_eq!(created.author, "ada");
        assert_eq!(created.user_id, Some(user_id));

        let listed = service.list_snippets(None).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(stored(&db, created.id).await, created);
    }

    #[tokio::test]
    async fn test_create_snippet_rejections() {
        let (db, _) = setup().await;
        let service = SnippetService::new(&db);

        let mut missing = new_snippet(Some(1));
        missing.code = "  ".to_string();
        assert!(matches!(
            service.create_snippet(&missing).await,
            Err(MuseumError::Validation(_))
        ));
        assert!(matches!(
            service.create_snippet(&new_snippet(None)).await,
            Err(MuseumError::Auth(_))
        ));
        assert!(matches!(
            service.create_snippet(&new_snippet(Some(999))).await,
            Err(MuseumError::Auth(msg)) if msg == "Invalid user"
        ));
        assert!(service.list_snippets(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_view_is_monotonic() {
        let (db, user_id) = setup().await;
        let service = SnippetService::new(&db);
        let snippet = service.create_snippet(&new_snippet(Some(user_id))).await.unwrap();

        let first = service.record_view(snippet.id).await.unwrap();
        let second = service.record_view(snippet.id).await.unwrap();
        assert_eq!(second, first + 1);

        // Unknown ids are an internal failure, not a client error.
        assert!(matches!(
            service.record_view(999).await,
            Err(MuseumError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_like_requires_known_user() {
        let (db, user_id) = setup().await;
        let service = SnippetService::new(&db);
        let snippet = service.create_snippet(&new_snippet(Some(user_id))).await.unwrap();

        assert!(matches!(
            service.like(snippet.id, None, false).await,
            Err(MuseumError::Auth(_))
        ));
        assert!(matches!(
            service.like(snippet.id, Some(999), false).await,
            Err(MuseumError::Auth(_))
        ));
        assert_eq!(service.like(snippet.id, Some(user_id), false).await.unwrap(), 1);
        // No server-side duplicate protection.
        assert_eq!(service.like(snippet.id, Some(user_id), false).await.unwrap(), 2);
        assert!(matches!(
            service.like(999, Some(user_id), false).await,
            Err(MuseumError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_anonymous_like() {
        let (db, user_id) = setup().await;
        let service = SnippetService::new(&db);
        let snippet = service.create_snippet(&new_snippet(Some(user_id))).await.unwrap();

        assert_eq!(service.like(snippet.id, None, true).await.unwrap(), 1);
        assert_eq!(service.like(snippet.id, Some(999), true).await.unwrap(), 2);
        assert!(matches!(
            service.like(999, None, true).await,
            Err(MuseumError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_add_comment_bumps_counter() {
        let (db, user_id) = setup().await;
        let service = SnippetService::new(&db);
        let snippet = service.create_snippet(&new_snippet(Some(user_id))).await.unwrap();

        service
            .add_comment(snippet.id, Some(user_id), "ada", "first")
            .await
            .unwrap();
        let second = service
            .add_comment(snippet.id, Some(user_id), " ada ", "  second  ")
            .await
            .unwrap();
        assert_eq!(second.username, "ada");
        assert_eq!(second.comment_text, "second");

        let comments = service.list_comments(snippet.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0], second);

        assert_eq!(stored(&db, snippet.id).await.comments, 2);
    }

    #[tokio::test]
    async fn test_add_comment_rejections_leave_no_trace() {
        let (db, user_id) = setup().await;
        let service = SnippetService::new(&db);
        let snippet = service.create_snippet(&new_snippet(Some(user_id))).await.unwrap();

        assert!(matches!(
            service.add_comment(snippet.id, Some(user_id), "ada", "   ").await,
            Err(MuseumError::Validation(_))
        ));
        assert!(matches!(
            service.add_comment(snippet.id, None, "ada", "hi").await,
            Err(MuseumError::Auth(_))
        ));
        assert!(matches!(
            service.add_comment(snippet.id, Some(999), "ada", "hi").await,
            Err(MuseumError::Auth(_))
        ));
        assert!(matches!(
            service.add_comment(999, Some(user_id), "ada", "hi").await,
            Err(MuseumError::Database(_))
        ));

        assert!(service.list_comments(snippet.id).await.unwrap().is_empty());
        assert!(service.list_comments(999).await.unwrap().is_empty());
        assert_eq!(stored(&db, snippet.id).await.comments, 0);
    }
}
