//! Router configuration for the Web API.

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{
    create_comment, create_snippet, health, like_snippet, list_comments, list_snippets, login,
    record_view, root, signup, AppState,
};
use super::middleware::create_cors_layer;
use super::openapi::ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let snippet_routes = Router::new()
        .route("/", get(list_snippets).post(create_snippet))
        .route("/:id/view", post(record_view))
        .route("/:id/like", post(like_snippet))
        .route("/:id/comments", get(list_comments).post(create_comment));

    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login));

    let api_routes = Router::new()
        .nest("/snippets", snippet_routes)
        .nest("/auth", auth_routes)
        .route("/health", get(health));

    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes)
        .merge(create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a router serving the OpenAPI document.
pub fn create_openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
