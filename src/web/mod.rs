//! Web API module for Code Museum.
//!
//! A REST API over users, snippets, and comments. The client application
//! in [`crate::client`] talks to it over HTTP.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
