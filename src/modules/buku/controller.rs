use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use pustaka_core::AppError;
use pustaka_models::{Buku, BukuId, BukuRequest};

use super::service::BukuService;
use crate::modules::auth::controller::{ErrorResponse, ValidationErrorResponse};
use crate::state::AppState;
use crate::validator::JsonBody;

/// A path segment that is not a valid id cannot name an existing buku.
fn parse_id(raw: &str) -> Result<BukuId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(anyhow::anyhow!("Buku not found")))
}

/// List every buku in insertion order
#[utoipa::path(
    get,
    path = "/api/buku",
    responses(
        (status = 200, description = "All buku", body = [Buku]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Buku",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_buku(State(state): State<AppState>) -> Result<Json<Vec<Buku>>, AppError> {
    let buku = BukuService::list(&state.db).await?;
    Ok(Json(buku))
}

/// Get a single buku
#[utoipa::path(
    get,
    path = "/api/buku/{id}",
    params(
        ("id" = i64, Path, description = "Buku ID")
    ),
    responses(
        (status = 200, description = "Buku details", body = Buku),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Buku not found", body = ErrorResponse)
    ),
    tag = "Buku",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_buku(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Buku>, AppError> {
    let id = parse_id(&id)?;
    let buku = BukuService::find(&state.db, id).await?;
    Ok(Json(buku))
}

/// Create a buku (editor or admin)
#[utoipa::path(
    post,
    path = "/api/buku",
    request_body = BukuRequest,
    responses(
        (status = 201, description = "Buku created", body = Buku),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires editor or admin", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    tag = "Buku",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_buku(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<BukuRequest>,
) -> Result<(StatusCode, Json<Buku>), AppError> {
    let fields = dto.into_fields().map_err(|errors| AppError::validation(&errors))?;
    let buku = BukuService::create(&state.db, fields).await?;
    Ok((StatusCode::CREATED, Json(buku)))
}

/// Replace all fields of a buku (editor or admin)
#[utoipa::path(
    put,
    path = "/api/buku/{id}",
    params(
        ("id" = i64, Path, description = "Buku ID")
    ),
    request_body = BukuRequest,
    responses(
        (status = 200, description = "Buku updated", body = Buku),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires editor or admin", body = ErrorResponse),
        (status = 404, description = "Buku not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    tag = "Buku",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_buku(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(dto): JsonBody<BukuRequest>,
) -> Result<Json<Buku>, AppError> {
    let fields = dto.into_fields().map_err(|errors| AppError::validation(&errors))?;
    let id = parse_id(&id)?;
    let buku = BukuService::update(&state.db, id, fields).await?;
    Ok(Json(buku))
}

/// Delete a buku (admin only)
#[utoipa::path(
    delete,
    path = "/api/buku/{id}",
    params(
        ("id" = i64, Path, description = "Buku ID")
    ),
    responses(
        (status = 204, description = "Buku deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires admin", body = ErrorResponse),
        (status = 404, description = "Buku not found", body = ErrorResponse)
    ),
    tag = "Buku",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_buku(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    BukuService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), BukuId::new(12));
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        let error = parse_id("abc").unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.message(), "Buku not found");
    }
}
