//! Snippet module for Code Museum.
//!
//! This module provides the core museum functionality:
//! - Snippets with optional before/after code and tags
//! - Engagement counters (views, likes, comments)
//! - Comments on snippets

mod comment;
mod comment_repository;
mod repository;
mod service;
mod types;

pub use comment::{Comment, NewComment};
pub use comment_repository::CommentRepository;
pub use repository::{Counter, SnippetRepository};
pub use service::SnippetService;
pub use types::{category_filter, Category, NewSnippet, Snippet, CATEGORY_ALL};
