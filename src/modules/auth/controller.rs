use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use pustaka_core::{AppError, FieldErrors};
use pustaka_models::{AuthResponse, LoginRequest, RegisterRequest, UserWithRole};

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::JsonBody;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid credentials")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(example = "The email field is required. (and 1 more error)")]
    pub message: String,
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
}

/// Register a new user and receive a token
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(&state.db, dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Revoke the token used for this request
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Token revoked"),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<StatusCode, AppError> {
    AuthService::logout(&state.db, &auth_user.claims).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the authenticated user and its role
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = UserWithRole),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn me(auth_user: AuthUser) -> Json<UserWithRole> {
    Json(auth_user.user)
}
