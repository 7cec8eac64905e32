use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejectionReason,
};

use pustaka_auth::{Claims, verify_token};
use pustaka_core::AppError;
use pustaka_models::{RoleName, UserId, UserWithRole};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// The authenticated caller.
///
/// Resolved from the `Authorization: Bearer <token>` header. The token must
/// verify, must not be revoked, and must belong to an existing user. The user
/// and its role are loaded from the database on every request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserWithRole,
    pub claims: Claims,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.user.user.id
    }

    /// `None` when the stored role is not one of the known names.
    pub fn role(&self) -> Option<RoleName> {
        self.user.role_name()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by the role middleware
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| match rejection.reason() {
                TypedHeaderRejectionReason::Missing => {
                    AppError::unauthorized("Missing authorization header".to_string())
                }
                _ => AppError::unauthorized("Invalid authorization header format".to_string()),
            })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        if AuthService::is_token_revoked(&state.db, claims.token_id()?).await? {
            return Err(AppError::unauthorized("Token has been revoked".to_string()));
        }

        let user_id = UserId::new(claims.user_id()?);
        let user = AuthService::find_user_with_role(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists".to_string()))?;

        let auth_user = AuthUser { user, claims };
        parts.extensions.insert(auth_user.clone());

        Ok(auth_user)
    }
}
