//! Terminal client for Code Museum.
//!
//! - [`api`]: HTTP client, one method per endpoint
//! - [`store`]: in-memory client state and local filtering
//! - [`storage`]: remembered identity on disk
//! - [`app`]: controller applying the client-side guards
//! - [`highlight`] and [`render`]: terminal output

pub mod api;
pub mod app;
pub mod highlight;
pub mod render;
pub mod storage;
pub mod store;

pub use api::ApiClient;
pub use app::{
    failure_message, fallback_snippet, parse_tags, welcome_message, MuseumApp, SnippetDetail,
    SnippetDraft, DEFAULT_LANGUAGE, LANGUAGES, LOGOUT_MESSAGE, SNIPPET_ADDED_MESSAGE,
};
pub use storage::{IdentityStore, CURRENT_USER_KEY};
pub use store::{AccountSummary, MuseumStore};
