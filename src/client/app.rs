//! Client controller.
//!
//! [`MuseumApp`] performs user actions: it applies the client-side guards,
//! calls the API, and folds the results into the [`MuseumStore`]. The
//! remembered identity is read once at startup and written only on
//! login, signup and logout.

use tracing::{info, warn};

use crate::db::UserIdentity;
use crate::snippet::{Category, Comment, Snippet};
use crate::web::dto::CreateSnippetRequest;
use crate::{MuseumError, Result};

use super::api::ApiClient;
use super::storage::IdentityStore;
use super::store::{AccountSummary, MuseumStore};

/// Languages offered when posting a snippet.
pub const LANGUAGES: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "C++",
    "SQL",
    "TypeScript",
    "Go",
    "Rust",
];

/// Default language of a new snippet.
pub const DEFAULT_LANGUAGE: &str = "JavaScript";

/// Placeholder shown when the snippet list cannot be fetched.
pub fn fallback_snippet() -> Snippet {
    Snippet {
        id: 1,
        title: "The Null Pointer That Cost 3 Days".to_string(),
        category: Category::BugFix.as_str().to_string(),
        language: "JavaScript".to_string(),
        story: "After three sleepless nights debugging a production crash, I finally found it."
            .to_string(),
        code: "const userName = user?.profile?.name || 'Anonymous';".to_string(),
        before_code: Some("const userName = user.profile.name;".to_string()),
        tags: vec!["debugging".to_string(), "javascript".to_string()],
        author: "Sarah Chen".to_string(),
        user_id: None,
        views: 1523,
        likes: 234,
        comments: 42,
        created_at: "2024-11-15 00:00:00".to_string(),
    }
}

/// Split comma-separated tags, trimming each and dropping empty entries.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Message shown when an action fails.
///
/// Client-side guard messages are shown as is; anything from the server or
/// the transport names the failed action.
pub fn failure_message(action: &str, err: &MuseumError) -> String {
    match err {
        MuseumError::Auth(msg) | MuseumError::Validation(msg) => msg.clone(),
        MuseumError::Api { message, .. } => format!("Failed to {action}: {message}"),
        other => format!("Failed to {action}: {other}"),
    }
}

/// Greeting after a successful login or signup.
pub fn welcome_message(user: &UserIdentity) -> String {
    format!("Welcome {}!", user.username)
}

/// Confirmation after logout.
pub const LOGOUT_MESSAGE: &str = "Logged out successfully!";

/// Confirmation after a snippet was posted.
pub const SNIPPET_ADDED_MESSAGE: &str = "Your snippet has been added to the museum!";

/// Form data for a new snippet.
#[derive(Debug, Clone)]
pub struct SnippetDraft {
    /// Title.
    pub title: String,
    /// Category.
    pub category: Category,
    /// Programming language.
    pub language: String,
    /// The story behind the code.
    pub story: String,
    /// The code.
    pub code: String,
    /// Optional code before the fix.
    pub before: String,
    /// Comma-separated tags.
    pub tags: String,
}

impl Default for SnippetDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: Category::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            story: String::new(),
            code: String::new(),
            before: String::new(),
            tags: String::new(),
        }
    }
}

impl SnippetDraft {
    /// Whether title, story and code are all filled in.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.story, &self.code]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Build the API request for this draft on behalf of `user`.
    pub fn to_request(&self, user: &UserIdentity) -> CreateSnippetRequest {
        CreateSnippetRequest {
            title: self.title.clone(),
            category: self.category.as_str().to_string(),
            language: self.language.clone(),
            story: self.story.clone(),
            code: self.code.clone(),
            before: Some(self.before.clone()).filter(|b| !b.trim().is_empty()),
            tags: parse_tags(&self.tags),
            author: user.username.clone(),
            user_id: Some(user.id),
        }
    }
}

/// Snippet detail as shown after opening it.
#[derive(Debug, Clone)]
pub struct SnippetDetail {
    /// The snippet with its updated view count.
    pub snippet: Snippet,
    /// Comments, newest first.
    pub comments: Vec<Comment>,
}

/// Client controller owning the API client, state, and identity store.
pub struct MuseumApp {
    api: ApiClient,
    store: MuseumStore,
    identity: IdentityStore,
}

impl MuseumApp {
    /// Create the controller, restoring a remembered identity.
    ///
    /// An unreadable identity file is logged and ignored.
    pub fn new(api: ApiClient, identity: IdentityStore) -> Self {
        let current_user = match identity.load() {
            Ok(user) => user,
            Err(e) => {
                warn!("Ignoring unreadable identity store: {}", e);
                None
            }
        };
        Self {
            api,
            store: MuseumStore::new(current_user),
            identity,
        }
    }

    /// Current state.
    pub fn store(&self) -> &MuseumStore {
        &self.store
    }

    /// Mutable state, for filter and search changes.
    pub fn store_mut(&mut self) -> &mut MuseumStore {
        &mut self.store
    }

    /// The API client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The logged-in user.
    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.store.current_user()
    }

    fn require_user(&self, message: &str) -> Result<UserIdentity> {
        self.store
            .current_user()
            .cloned()
            .ok_or_else(|| MuseumError::Auth(message.to_string()))
    }

    /// Load all snippets. On failure the placeholder snippet is shown
    /// instead and `false` is returned.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list_snippets(None).await {
            Ok(snippets) => {
                self.store.set_snippets(snippets);
                true
            }
            Err(e) => {
                warn!("Error fetching snippets: {}", e);
                self.store.set_fallback(vec![fallback_snippet()]);
                false
            }
        }
    }

    /// Open a snippet: count a view and fetch its comments.
    ///
    /// View and comment failures are logged and do not block the detail.
    pub async fn open_snippet(&mut self, id: i64) -> Result<SnippetDetail> {
        if self.store.snippet(id).is_none() {
            self.refresh().await;
        }
        let mut snippet = self
            .store
            .snippet(id)
            .cloned()
            .ok_or_else(|| MuseumError::NotFound("Snippet".to_string()))?;

        match self.api.record_view(id).await {
            Ok(views) => {
                self.store.record_views(id, views);
                snippet.views = views;
            }
            Err(e) => warn!("Error recording view: {}", e),
        }

        let comments = match self.api.list_comments(id).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!("Error fetching comments: {}", e);
                Vec::new()
            }
        };

        Ok(SnippetDetail { snippet, comments })
    }

    /// Like a snippet once per run and return the like count.
    ///
    /// A second like in the same run does not reach the server.
    pub async fn like(&mut self, id: i64) -> Result<i64> {
        let user = self.require_user("Please login to like snippets!")?;
        if self.store.has_liked(id) {
            return Ok(self.store.snippet(id).map_or(0, |s| s.likes));
        }
        let likes = self.api.like(id, Some(user.id)).await?;
        self.store.record_like(id, likes);
        Ok(likes)
    }

    /// Post a comment as the current user.
    pub async fn add_comment(&mut self, id: i64, text: &str) -> Result<Comment> {
        let user = self.require_user("Please login to comment!")?;
        let text = text.trim();
        if text.is_empty() {
            return Err(MuseumError::Validation("Comment cannot be empty".to_string()));
        }
        let comment = self
            .api
            .add_comment(id, user.id, &user.username, text)
            .await?;
        self.store.record_comment(id);
        Ok(comment)
    }

    /// Post a new snippet as the current user and put it first in the list.
    pub async fn create_snippet(&mut self, draft: &SnippetDraft) -> Result<Snippet> {
        let user = self.require_user("Please login to add snippets!")?;
        if !draft.is_complete() {
            return Err(MuseumError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        let snippet = self.api.create_snippet(&draft.to_request(&user)).await?;
        self.store.prepend(snippet.clone());
        info!(snippet_id = snippet.id, "snippet posted");
        Ok(snippet)
    }

    /// Register and log in.
    pub async fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<UserIdentity> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(MuseumError::Validation("Please fill all fields".to_string()));
        }
        let user = self.api.signup(username, email, password).await?;
        self.remember(user.clone())?;
        Ok(user)
    }

    /// Log in.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserIdentity> {
        if email.is_empty() || password.is_empty() {
            return Err(MuseumError::Validation("Please fill all fields".to_string()));
        }
        let user = self.api.login(email, password).await?;
        self.remember(user.clone())?;
        Ok(user)
    }

    fn remember(&mut self, user: UserIdentity) -> Result<()> {
        self.identity.save(&user)?;
        self.store.set_user(user);
        Ok(())
    }

    /// Log out and forget the remembered identity.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear_user();
        self.identity.clear()
    }

    /// Summary of the current user's snippets among those loaded.
    pub fn account_summary(&self) -> Option<AccountSummary> {
        self.store.account_summary()
    }
}
