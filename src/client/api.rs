//! HTTP client for the Code Museum API.
//!
//! One method per endpoint. Error responses are turned into
//! [`MuseumError::Api`] carrying the server's `error` message.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::db::UserIdentity;
use crate::snippet::{category_filter, Comment, Snippet};
use crate::web::dto::{
    CreateCommentRequest, CreateSnippetRequest, HealthResponse, LikeRequest, LikesResponse,
    ListSnippetsQuery, LoginRequest, SignupRequest, ViewsResponse,
};
use crate::{MuseumError, Result};

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Total request timeout in seconds.
const TOTAL_TIMEOUT_SECS: u64 = 15;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("code-museum/", env!("CARGO_PKG_VERSION"));

/// Error body as sent by the server. Only the message is needed.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for the Code Museum REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| MuseumError::Config(format!("invalid API URL {base_url}: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(TOTAL_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MuseumError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| MuseumError::Config(format!("invalid API path {path}: {e}")))
    }

    /// List snippets, optionally filtered by category. "All" is never sent.
    pub async fn list_snippets(&self, category: Option<&str>) -> Result<Vec<Snippet>> {
        let query = ListSnippetsQuery {
            category: category_filter(category).map(str::to_string),
            search: None,
        };
        let response = self
            .client
            .get(self.url("api/snippets")?)
            .query(&query)
            .send()
            .await?;
        decode(response).await
    }

    /// Record a view and return the new view count.
    pub async fn record_view(&self, snippet_id: i64) -> Result<i64> {
        let response = self
            .client
            .post(self.url(&format!("api/snippets/{snippet_id}/view"))?)
            .send()
            .await?;
        let body: ViewsResponse = decode(response).await?;
        Ok(body.views)
    }

    /// Like a snippet and return the new like count.
    pub async fn like(&self, snippet_id: i64, user_id: Option<i64>) -> Result<i64> {
        let response = self
            .client
            .post(self.url(&format!("api/snippets/{snippet_id}/like"))?)
            .json(&LikeRequest { user_id })
            .send()
            .await?;
        let body: LikesResponse = decode(response).await?;
        Ok(body.likes)
    }

    /// List the comments of a snippet, newest first.
    pub async fn list_comments(&self, snippet_id: i64) -> Result<Vec<Comment>> {
        let response = self
            .client
            .get(self.url(&format!("api/snippets/{snippet_id}/comments"))?)
            .send()
            .await?;
        decode(response).await
    }

    /// Add a comment and return the stored comment.
    pub async fn add_comment(
        &self,
        snippet_id: i64,
        user_id: i64,
        username: &str,
        comment_text: &str,
    ) -> Result<Comment> {
        let request = CreateCommentRequest {
            user_id: Some(user_id),
            username: username.to_string(),
            comment_text: comment_text.to_string(),
        };
        let response = self
            .client
            .post(self.url(&format!("api/snippets/{snippet_id}/comments"))?)
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// Create a snippet and return the stored row.
    pub async fn create_snippet(&self, request: &CreateSnippetRequest) -> Result<Snippet> {
        let response = self
            .client
            .post(self.url("api/snippets")?)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Register a new user.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<UserIdentity> {
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("api/auth/signup")?)
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// Log in by email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserIdentity> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("api/auth/login")?)
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// Check server health.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.client.get(self.url("api/health")?).send().await?;
        decode(response).await
    }
}

/// Decode a successful JSON response, or turn an error status into
/// [`MuseumError::Api`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    Err(MuseumError::Api {
        status: status.as_u16(),
        message,
    })
}
