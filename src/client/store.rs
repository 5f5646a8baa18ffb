//! Client application state.
//!
//! [`MuseumStore`] owns everything the client knows: the current user, the
//! loaded snippets, the active filter and search term, and which snippets
//! were liked during this run. Nothing here touches the network or disk.

use std::collections::HashSet;

use crate::db::UserIdentity;
use crate::snippet::{Snippet, CATEGORY_ALL};

/// Per-user totals derived from the loaded snippets.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    /// Snippets whose author matches the username.
    pub snippets: Vec<Snippet>,
    /// Sum of likes over those snippets.
    pub total_likes: i64,
    /// Sum of views over those snippets.
    pub total_views: i64,
}

/// State container for the client.
#[derive(Debug, Clone)]
pub struct MuseumStore {
    current_user: Option<UserIdentity>,
    snippets: Vec<Snippet>,
    category: String,
    search: String,
    liked: HashSet<i64>,
    fallback: bool,
}

impl Default for MuseumStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MuseumStore {
    /// Create a store, optionally starting with a remembered user.
    pub fn new(current_user: Option<UserIdentity>) -> Self {
        Self {
            current_user,
            snippets: Vec::new(),
            category: CATEGORY_ALL.to_string(),
            search: String::new(),
            liked: HashSet::new(),
            fallback: false,
        }
    }

    /// The logged-in user.
    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.current_user.as_ref()
    }

    /// Set the logged-in user.
    pub fn set_user(&mut self, user: UserIdentity) {
        self.current_user = Some(user);
    }

    /// Forget the logged-in user.
    pub fn clear_user(&mut self) {
        self.current_user = None;
    }

    /// Whether the list holds placeholder data after a failed fetch.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// All loaded snippets, newest first.
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Replace the loaded snippets.
    pub fn set_snippets(&mut self, snippets: Vec<Snippet>) {
        self.snippets = snippets;
        self.fallback = false;
    }

    /// Replace the loaded snippets with placeholder data.
    pub fn set_fallback(&mut self, snippets: Vec<Snippet>) {
        self.snippets = snippets;
        self.fallback = true;
    }

    /// Add a freshly created snippet at the front.
    pub fn prepend(&mut self, snippet: Snippet) {
        self.snippets.insert(0, snippet);
    }

    /// Find a loaded snippet by ID.
    pub fn snippet(&self, id: i64) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    fn snippet_mut(&mut self, id: i64) -> Option<&mut Snippet> {
        self.snippets.iter_mut().find(|s| s.id == id)
    }

    /// Active category filter ("All" when unfiltered).
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Set the category filter. Empty resets to "All".
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            CATEGORY_ALL.to_string()
        } else {
            category
        };
    }

    /// Active search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Set the search term.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Snippets matching the category filter and the search term.
    pub fn filtered_snippets(&self) -> Vec<&Snippet> {
        self.snippets
            .iter()
            .filter(|s| self.category == CATEGORY_ALL || s.category == self.category)
            .filter(|s| s.matches_search(&self.search))
            .collect()
    }

    /// Whether the snippet was liked during this run.
    pub fn has_liked(&self, id: i64) -> bool {
        self.liked.contains(&id)
    }

    /// Record a successful like and its new total.
    pub fn record_like(&mut self, id: i64, likes: i64) {
        self.liked.insert(id);
        if let Some(snippet) = self.snippet_mut(id) {
            snippet.likes = likes;
        }
    }

    /// Record a new view total.
    pub fn record_views(&mut self, id: i64, views: i64) {
        if let Some(snippet) = self.snippet_mut(id) {
            snippet.views = views;
        }
    }

    /// Count one more comment on a snippet.
    pub fn record_comment(&mut self, id: i64) {
        if let Some(snippet) = self.snippet_mut(id) {
            snippet.comments += 1;
        }
    }

    /// Summary of the current user's snippets, matched by author name.
    pub fn account_summary(&self) -> Option<AccountSummary> {
        let user = self.current_user.as_ref()?;
        let snippets: Vec<Snippet> = self
            .snippets
            .iter()
            .filter(|s| s.author == user.username)
            .cloned()
            .collect();
        let total_likes = snippets.iter().map(|s| s.likes).sum();
        let total_views = snippets.iter().map(|s| s.views).sum();
        Some(AccountSummary {
            snippets,
            total_likes,
            total_views,
        })
    }
}
