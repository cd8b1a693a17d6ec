pub mod health;
pub mod list_page;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /{category}/initial-list          filter, ui, dataList, filterFavorites (GET)
/// /{category}/list                  submit filter, returns data (POST)
/// /{category}/filterReset           default filter (GET)
/// /{category}/filter/{action}       favorites: create, delete, select,
///                                   rename, update (GET or POST)
/// ```
///
/// `{category}` is one of `timesheet`, `calendar`, `order`, `account`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(list_page::router())
}
