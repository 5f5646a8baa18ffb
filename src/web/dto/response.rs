//! Response DTOs for the Web API.
//!
//! Snippets, comments and user identities are returned as their model types;
//! only the small counter and status payloads live here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response of the view endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ViewsResponse {
    /// View count after the increment.
    pub views: i64,
}

/// Response of the like endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LikesResponse {
    /// Like count after the increment.
    pub likes: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "OK" when the server answers.
    pub status: String,
    /// Server time in RFC 3339.
    pub timestamp: String,
}

/// Root route response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// Service name.
    pub message: String,
    /// Package version.
    pub version: String,
}
