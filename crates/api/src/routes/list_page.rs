//! Route definitions for generic list pages and their filter favorites.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{favorites, list_page};
use crate::state::AppState;

/// List page routes mounted at the API root.
///
/// ```text
/// GET      /{category}/initial-list     -> initial_list
/// POST     /{category}/list             -> list
/// GET      /{category}/filterReset      -> filter_reset
/// GET/POST /{category}/filter/{action}  -> favorite_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{category}/initial-list", get(list_page::initial_list))
        .route("/{category}/list", post(list_page::list))
        .route("/{category}/filterReset", get(list_page::filter_reset))
        .route(
            "/{category}/filter/{action}",
            get(favorites::favorite_action).post(favorites::favorite_action),
        )
}
