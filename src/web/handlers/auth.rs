//! Authentication handlers for the Web API.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{login as login_user, register, RegistrationRequest};
use crate::db::UserIdentity;
use crate::web::dto::{LoginRequest, SignupRequest, ValidatedJson};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// POST /api/auth/signup - Register a new user.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = UserIdentity),
        (status = 400, description = "Missing fields or user already exists", body = ErrorBody)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserIdentity>), ApiError> {
    let request = RegistrationRequest::new(req.username, req.email, req.password);
    let identity = register(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(identity)))
}

/// POST /api/auth/login - Log in by email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserIdentity),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserIdentity>, ApiError> {
    let identity = login_user(&state.db, &req.email, &req.password).await?;
    Ok(Json(identity))
}
