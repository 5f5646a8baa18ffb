//! OpenAPI document for the Web API.

use utoipa::OpenApi;

use crate::db::UserIdentity;
use crate::snippet::{Comment, Snippet};
use crate::web::dto::{
    CreateCommentRequest, CreateSnippetRequest, HealthResponse, LikeRequest, LikesResponse,
    LoginRequest, RootResponse, SignupRequest, ViewsResponse,
};
use crate::web::error::{ErrorBody, ErrorCode};
use crate::web::handlers;

/// OpenAPI documentation, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Code Museum API", description = "Browse, post, like, and comment on code snippets"),
    paths(
        handlers::health::root,
        handlers::health::health,
        handlers::snippets::list_snippets,
        handlers::snippets::create_snippet,
        handlers::snippets::record_view,
        handlers::snippets::like_snippet,
        handlers::snippets::list_comments,
        handlers::snippets::create_comment,
        handlers::auth::signup,
        handlers::auth::login,
    ),
    components(schemas(
        Snippet,
        Comment,
        UserIdentity,
        CreateSnippetRequest,
        CreateCommentRequest,
        LikeRequest,
        SignupRequest,
        LoginRequest,
        ViewsResponse,
        LikesResponse,
        HealthResponse,
        RootResponse,
        ErrorBody,
        ErrorCode,
    )),
    tags(
        (name = "snippets", description = "Snippet listing, creation, views, and likes"),
        (name = "comments", description = "Snippet comments"),
        (name = "auth", description = "Signup and login"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for path in [
            "/",
            "/api/health",
            "/api/snippets",
            "/api/snippets/{id}/view",
            "/api/snippets/{id}/like",
            "/api/snippets/{id}/comments",
            "/api/auth/signup",
            "/api/auth/login",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == path), "missing {path}");
        }
    }
    #[test]
    fn test_like_route_documents_anonymous_switch() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let like = &doc["paths"]["/api/snippets/{id}/like"]["post"];
        let description = like["description"].as_str().unwrap_or_default();
        assert!(description.contains("web.anonymous_likes"), "{description}");

        for path in ["/api/snippets/{id}/view", "/api/snippets/{id}/like"] {
            let responses = &doc["paths"][path]["post"]["responses"];
            assert!(responses.get("404").is_none(), "{path}");
            assert!(responses.get("500").is_some(), "{path}");
        }
    }
}
