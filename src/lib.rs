//! Code Museum
//!
//! A small community site for legendary code snippets: an HTTP API over
//! users, snippets and comments, and a terminal client for it.

pub mod auth;
pub mod client;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod screen;
pub mod snippet;
pub mod web;

pub use auth::{login, register, RegistrationRequest};
pub use config::Config;
pub use db::{Database, NewUser, User, UserIdentity, UserRepository};
pub use error::{MuseumError, Result};
pub use snippet::{Category, Comment, NewSnippet, Snippet, SnippetService};
pub use web::WebServer;
