//! Handler for `/{category}/filter/{action}`: named filter favorites.
//!
//! One endpoint serves all five actions. `id` and `newName` travel as
//! query parameters; `create` and `update` carry the filter as the body.
//! Only the response keys an action changed are present.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use pforge_core::error::CoreError;
use pforge_core::favorites::{validate_favorite_name, FavoriteAction, FavoriteSummary};
use pforge_core::filter::{Category, ListFilter};
use pforge_core::types::DbId;
use pforge_core::ui::UiLayout;
use pforge_db::models::favorite::{CreateFavorite, Favorite};
use pforge_db::store::Store;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::list_page::{parse_category, today};
use crate::list_page::{categories, FilterState};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters of the favorites endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteParams {
    pub id: Option<DbId>,
    pub new_name: Option<String>,
}

/// Partial page update returned by every favorite action.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_favorites: Option<Vec<FavoriteSummary>>,
}

/// Favorites of a user in one category as shown in the favorites menu.
pub(crate) async fn favorite_summaries(
    store: &dyn Store,
    user_id: DbId,
    category: Category,
) -> AppResult<Vec<FavoriteSummary>> {
    let favorites = store.list_favorites(user_id, category.as_str()).await?;
    Ok(favorites.iter().map(Favorite::summary).collect())
}

/// GET|POST /api/v1/{category}/filter/{action}
pub async fn favorite_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((category, action)): Path<(String, String)>,
    Query(params): Query<FavoriteParams>,
    body: Bytes,
) -> AppResult<Json<FavoriteResponse>> {
    let category = parse_category(&category)?;
    let action = action.parse::<FavoriteAction>()?;
    let body = parse_body(&body)?;

    let ctx = FavoriteContext {
        store: state.store.as_ref(),
        user_id: auth.user_id,
        category,
    };

    tracing::debug!(user_id = auth.user_id, %category, ?action, id = ?params.id, "Favorite action");

    let response = match action {
        FavoriteAction::Create => ctx.create(params, body).await?,
        FavoriteAction::Delete => ctx.delete(params).await?,
        FavoriteAction::Select => ctx.select(params).await?,
        FavoriteAction::Rename => ctx.rename(params).await?,
        FavoriteAction::Update => ctx.update(params, body).await?,
    };
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// An empty body means "no filter"; anything else must be JSON.
fn parse_body(raw: &[u8]) -> AppResult<Option<serde_json::Value>> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("Invalid filter body: {e}")))
}

/// Check that `raw` is a filter of `category` without normalizing it.
fn validate_filter(raw: &serde_json::Value, category: Category) -> AppResult<ListFilter> {
    let filter: ListFilter = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::BadRequest(format!("Invalid filter body: {e}")))?;
    Ok(filter.scoped_to(category)?)
}

fn require_body(body: Option<serde_json::Value>, action: &str) -> AppResult<serde_json::Value> {
    body.ok_or_else(|| AppError::BadRequest(format!("Favorite {action} requires a filter body")))
}

fn require_id(params: &FavoriteParams, action: &str) -> AppResult<DbId> {
    params
        .id
        .ok_or_else(|| AppError::BadRequest(format!("Favorite {action} requires an id")))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "FilterFavorite",
        id,
    })
}

struct FavoriteContext<'a> {
    store: &'a dyn Store,
    user_id: DbId,
    category: Category,
}

impl FavoriteContext<'_> {
    fn filter_state(&self) -> FilterState<'_> {
        FilterState::new(self.store, self.user_id, self.category)
    }

    async fn summaries(&self) -> AppResult<Vec<FavoriteSummary>> {
        favorite_summaries(self.store, self.user_id, self.category).await
    }

    /// The favorite `id` if it belongs to this user and category.
    async fn owned(&self, id: DbId) -> AppResult<Favorite> {
        self.store
            .find_favorite(self.user_id, id)
            .await?
            .filter(|f| f.category == self.category.as_str())
            .ok_or_else(|| not_found(id))
    }

    async fn ensure_unique_name(&self, name: &str, except: Option<DbId>) -> AppResult<()> {
        let taken = self
            .store
            .list_favorites(self.user_id, self.category.as_str())
            .await?
            .iter()
            .any(|f| f.name == name && Some(f.id) != except);
        if taken {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "A favorite named '{name}' already exists"
            ))));
        }
        Ok(())
    }

    async fn create(
        &self,
        params: FavoriteParams,
        body: Option<serde_json::Value>,
    ) -> AppResult<FavoriteResponse> {
        let filter_json = require_body(body, "create")?;
        let filter = validate_filter(&filter_json, self.category)?;
        let raw_name = params
            .new_name
            .or(filter.name)
            .ok_or_else(|| AppError::BadRequest("Favorite create requires a name".into()))?;
        let name = validate_favorite_name(&raw_name)?;
        self.ensure_unique_name(&name, None).await?;

        let favorite = self
            .store
            .create_favorite(
                self.user_id,
                &CreateFavorite {
                    category: self.category.as_str().to_string(),
                    name,
                    filter_json,
                },
            )
            .await?;
        self.filter_state().remember_favorite(favorite.id).await?;

        tracing::info!(
            user_id = self.user_id,
            category = %self.category,
            favorite_id = favorite.id,
            name = %favorite.name,
            "Favorite created",
        );

        Ok(FavoriteResponse {
            filter_favorites: Some(self.summaries().await?),
            ..Default::default()
        })
    }

    async fn delete(&self, params: FavoriteParams) -> AppResult<FavoriteResponse> {
        let id = require_id(&params, "delete")?;

        let removed = match self.owned(id).await {
            Ok(_) => self.store.delete_favorite(self.user_id, id).await?,
            Err(AppError::Core(CoreError::NotFound { .. })) => false,
            Err(e) => return Err(e),
        };

        let filter_state = self.filter_state();
        if filter_state.selected_favorite().await? == Some(id) {
            filter_state.forget_favorite().await?;
        }

        if removed {
            tracing::info!(user_id = self.user_id, favorite_id = id, "Favorite deleted");
        } else {
            tracing::debug!(user_id = self.user_id, favorite_id = id, "Favorite already gone");
        }

        Ok(FavoriteResponse {
            filter_favorites: Some(self.summaries().await?),
            ..Default::default()
        })
    }

    async fn select(&self, params: FavoriteParams) -> AppResult<FavoriteResponse> {
        let id = require_id(&params, "select")?;
        let favorite = self.owned(id).await?;
        let filter = validate_filter(&favorite.filter_json, self.category)?;

        let filter_state = self.filter_state();
        filter_state.save(&filter).await?;
        filter_state.remember_favorite(id).await?;

        let data =
            categories::query_rows(self.store, self.user_id, self.category, &filter, today())
                .await?;

        Ok(FavoriteResponse {
            data: Some(data),
            filter: Some(favorite.filter_json),
            filter_favorites: Some(self.summaries().await?),
            ..Default::default()
        })
    }

    async fn rename(&self, params: FavoriteParams) -> AppResult<FavoriteResponse> {
        let id = require_id(&params, "rename")?;
        let raw_name = params
            .new_name
            .ok_or_else(|| AppError::BadRequest("Favorite rename requires newName".into()))?;
        let name = validate_favorite_name(&raw_name)?;

        self.owned(id).await?;
        self.ensure_unique_name(&name, Some(id)).await?;
        self.store
            .rename_favorite(self.user_id, id, &name)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(FavoriteResponse {
            filter_favorites: Some(self.summaries().await?),
            ..Default::default()
        })
    }

    async fn update(
        &self,
        params: FavoriteParams,
        body: Option<serde_json::Value>,
    ) -> AppResult<FavoriteResponse> {
        let mut filter_json = require_body(body, "update")?;
        // A favorite id in the body addresses the favorite; it is not part of the filter.
        let body_id = filter_json
            .as_object_mut()
            .and_then(|fields| fields.remove("id"))
            .and_then(|id| id.as_i64());
        validate_filter(&filter_json, self.category)?;

        let id = match params.id.or(body_id) {
            Some(id) => id,
            None => self.filter_state().selected_favorite().await?.ok_or_else(|| {
                AppError::BadRequest("No favorite selected to update".into())
            })?,
        };

        self.owned(id).await?;
        self.store
            .update_favorite_filter(self.user_id, id, &filter_json)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(user_id = self.user_id, favorite_id = id, "Favorite filter updated");

        Ok(FavoriteResponse {
            filter_favorites: Some(self.summaries().await?),
            ..Default::default()
        })
    }
}
