//! Snippet handlers for the Web API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::snippet::{Comment, Snippet, SnippetService};
use crate::web::dto::{
    CreateCommentRequest, CreateSnippetRequest, LikeRequest, LikesResponse, ListSnippetsQuery,
    ValidatedJson, ViewsResponse,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// GET /api/snippets - List snippets newest first.
#[utoipa::path(
    get,
    path = "/api/snippets",
    tag = "snippets",
    params(ListSnippetsQuery),
    responses(
        (status = 200, description = "Snippets, newest first", body = Vec<Snippet>),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn list_snippets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListSnippetsQuery>,
) -> Result<Json<Vec<Snippet>>, ApiError> {
    tracing::debug!(
        category = ?query.category,
        search = ?query.search,
        "listing snippets"
    );
    let snippets = SnippetService::new(&state.db)
        .list_snippets(query.category.as_deref())
        .await?;
    Ok(Json(snippets))
}

/// POST /api/snippets - Create a snippet.
#[utoipa::path(
    post,
    path = "/api/snippets",
    tag = "snippets",
    request_body = CreateSnippetRequest,
    responses(
        (status = 201, description = "Snippet created", body = Snippet),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 401, description = "Missing or unknown user", body = ErrorBody)
    )
)]
pub async fn create_snippet(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateSnippetRequest>,
) -> Result<(StatusCode, Json<Snippet>), ApiError> {
    let new_snippet = req.into_new_snippet();
    let snippet = SnippetService::new(&state.db)
        .create_snippet(&new_snippet)
        .await?;
    Ok((StatusCode::CREATED, Json(snippet)))
}

/// POST /api/snippets/:id/view - Record a view.
#[utoipa::path(
    post,
    path = "/api/snippets/{id}/view",
    tag = "snippets",
    params(("id" = i64, Path, description = "Snippet ID")),
    responses(
        (status = 200, description = "New view count", body = ViewsResponse),
        (status = 500, description = "Server error, including an unknown snippet id", body = ErrorBody)
    )
)]
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ViewsResponse>, ApiError> {
    let views = SnippetService::new(&state.db).record_view(id).await?;
    Ok(Json(ViewsResponse { views }))
}

/// POST /api/snippets/:id/like - Like a snippet.
///
/// The body must carry the `user_id` of a known user. When the server runs
/// with `web.anonymous_likes = true` the body may be omitted or carry no
/// `user_id`, and the like is counted without an acting user.
#[utoipa::path(
    post,
    path = "/api/snippets/{id}/like",
    tag = "snippets",
    params(("id" = i64, Path, description = "Snippet ID")),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "New like count", body = LikesResponse),
        (status = 401, description = "Missing or unknown user", body = ErrorBody),
        (status = 500, description = "Server error, including an unknown snippet id", body = ErrorBody)
    )
)]
pub async fn like_snippet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Option<Json<LikeRequest>>,
) -> Result<Json<LikesResponse>, ApiError> {
    let user_id = body.and_then(|Json(req)| req.user_id);
    let likes = SnippetService::new(&state.db)
        .like(id, user_id, state.anonymous_likes)
        .await?;
    Ok(Json(LikesResponse { likes }))
}

/// GET /api/snippets/:id/comments - List comments, newest first.
#[utoipa::path(
    get,
    path = "/api/snippets/{id}/comments",
    tag = "comments",
    params(("id" = i64, Path, description = "Snippet ID")),
    responses(
        (status = 200, description = "Comments, newest first", body = Vec<Comment>)
    )
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = SnippetService::new(&state.db).list_comments(id).await?;
    Ok(Json(comments))
}

/// POST /api/snippets/:id/comments - Add a comment.
#[utoipa::path(
    post,
    path = "/api/snippets/{id}/comments",
    tag = "comments",
    params(("id" = i64, Path, description = "Snippet ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Comment text and username required", body = ErrorBody),
        (status = 401, description = "Missing or unknown user", body = ErrorBody),
        (status = 500, description = "Server error, including an unknown snippet id", body = ErrorBody)
    )
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = SnippetService::new(&state.db)
        .add_comment(id, req.user_id, &req.username, &req.comment_text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
