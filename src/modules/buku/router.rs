use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::controller::{create_buku, delete_buku, get_buku, list_buku, update_buku};
use crate::middleware::role::{require_buku_delete, require_buku_read, require_buku_write};
use crate::state::AppState;

/// Buku routes, each group behind its own role layer.
pub fn init_buku_router(state: &AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_buku))
        .route("/{id}", get(get_buku))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_buku_read,
        ));

    let write = Router::new()
        .route("/", post(create_buku))
        .route("/{id}", put(update_buku))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_buku_write,
        ));

    let remove = Router::new()
        .route("/{id}", delete(delete_buku))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_buku_delete,
        ));

    read.merge(write).merge(remove)
}
