//! Filter favorite models and DTOs.

use pforge_core::favorites::FavoriteSummary;
use pforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `filter_favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub category: String,
    pub name: String,
    pub filter_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Favorite {
    pub fn summary(&self) -> FavoriteSummary {
        FavoriteSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// DTO for creating a favorite.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFavorite {
    pub category: String,
    pub name: String,
    pub filter_json: serde_json::Value,
}
