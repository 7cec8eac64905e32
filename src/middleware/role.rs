//! Role-based authorization middleware.
//!
//! Each protected route group carries a [`RouteGroup`]. Whether a role may
//! enter a group is decided by the pure [`is_allowed`] policy; the axum
//! middleware only resolves the caller and applies it.
//!
//! | Group | Allowed roles |
//! |-------|---------------|
//! | [`RouteGroup::ReadBuku`] | admin, editor, viewer |
//! | [`RouteGroup::WriteBuku`] | admin, editor |
//! | [`RouteGroup::DeleteBuku`] | admin |
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/buku/{id}", delete(delete_buku))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_buku_delete));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use pustaka_core::AppError;
use pustaka_models::RoleName;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    /// List and show buku
    ReadBuku,
    /// Create and update buku
    WriteBuku,
    /// Delete buku
    DeleteBuku,
}

impl RouteGroup {
    pub const fn allowed_roles(&self) -> &'static [RoleName] {
        match self {
            RouteGroup::ReadBuku => &[RoleName::Admin, RoleName::Editor, RoleName::Viewer],
            RouteGroup::WriteBuku => &[RoleName::Admin, RoleName::Editor],
            RouteGroup::DeleteBuku => &[RoleName::Admin],
        }
    }
}

/// Unknown roles are never allowed.
pub fn is_allowed(role: Option<RoleName>, group: RouteGroup) -> bool {
    role.is_some_and(|role| group.allowed_roles().contains(&role))
}

/// Authenticates the caller and checks its role against `group`.
///
/// The resolved [`AuthUser`] is stored in the request extensions so handlers
/// extracting it do not hit the database again.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    group: RouteGroup,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !is_allowed(auth_user.role(), group) {
        tracing::warn!(
            user_id = %auth_user.user_id(),
            role = %auth_user.user.role,
            group = ?group,
            "Role not allowed"
        );
        return Err(AppError::forbidden(
            "You do not have permission to perform this action".to_string(),
        ));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_buku_read(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    authorize(State(state), req, next, RouteGroup::ReadBuku)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_buku_write(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    authorize(State(state), req, next, RouteGroup::WriteBuku)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_buku_delete(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    authorize(State(state), req, next, RouteGroup::DeleteBuku)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}
