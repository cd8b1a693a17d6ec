//! Handlers for the generic list page of every category.
//!
//! A page boots with `initial-list`, then submits its filter to `list`
//! whenever the user searches. The submitted filter becomes the session
//! filter of that (user, category) pair.

use axum::extract::{Path, State};
use axum::Json;
use pforge_core::favorites::FavoriteSummary;
use pforge_core::filter::{Category, ListFilter};
use pforge_core::ui::UiLayout;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::favorites::favorite_summaries;
use crate::list_page::{categories, FilterState};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response of `GET /{category}/initial-list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialListResponse {
    pub filter: ListFilter,
    pub ui: UiLayout,
    pub data_list: Vec<serde_json::Value>,
    pub filter_favorites: Vec<FavoriteSummary>,
}

/// Response of `GET /{category}/filterReset`.
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub filter: ListFilter,
}

/// Resolve the `{category}` path segment. Unknown names are a 400.
pub(crate) fn parse_category(raw: &str) -> AppResult<Category> {
    Ok(raw.parse::<Category>()?)
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// GET /api/v1/{category}/initial-list
///
/// Everything a list page needs to render: its layout, the current
/// filter, the rows that filter selects and the user's favorites.
pub async fn initial_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<InitialListResponse>> {
    let category = parse_category(&category)?;
    let store = state.store.as_ref();

    let filter = FilterState::new(store, auth.user_id, category).load().await?;
    let data_list =
        categories::query_rows(store, auth.user_id, category, &filter, today()).await?;
    let filter_favorites = favorite_summaries(store, auth.user_id, category).await?;

    tracing::debug!(
        user_id = auth.user_id,
        %category,
        rows = data_list.len(),
        favorites = filter_favorites.len(),
        "Initial list served",
    );

    Ok(Json(InitialListResponse {
        filter,
        ui: categories::ui_layout(category),
        data_list,
        filter_favorites,
    }))
}

/// POST /api/v1/{category}/list
///
/// Store the submitted filter as the session filter and return the rows
/// it selects.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(filter): Json<ListFilter>,
) -> AppResult<Json<DataResponse<Vec<serde_json::Value>>>> {
    let category = parse_category(&category)?;
    let filter = filter.scoped_to(category)?;
    let store = state.store.as_ref();

    FilterState::new(store, auth.user_id, category)
        .save(&filter)
        .await?;
    let data = categories::query_rows(store, auth.user_id, category, &filter, today()).await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/{category}/filterReset
///
/// Discard the session filter; the page continues with the category default.
pub async fn filter_reset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<FilterResponse>> {
    let category = parse_category(&category)?;
    let filter = FilterState::new(state.store.as_ref(), auth.user_id, category)
        .reset()
        .await?;
    tracing::debug!(user_id = auth.user_id, %category, "Filter reset");
    Ok(Json(FilterResponse { filter }))
}
