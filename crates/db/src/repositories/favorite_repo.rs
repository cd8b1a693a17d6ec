//! Repository for the `filter_favorites` table.

use pforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::{CreateFavorite, Favorite};

/// Column list for `filter_favorites` queries.
const COLUMNS: &str = "\
    id, user_id, category, name, filter_json, \
    created_at, updated_at";

/// Provides data access for filter favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        category: &str,
    ) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM filter_favorites \
             WHERE user_id = $1 AND category = $2 \
             ORDER BY name"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM filter_favorites WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Favorite>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a favorite. A duplicate name within the user's category
    /// violates `uq_filter_favorites_user_category_name`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateFavorite,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO filter_favorites (user_id, category, name, filter_json) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(&input.category)
            .bind(&input.name)
            .bind(&input.filter_json)
            .fetch_one(pool)
            .await
    }

    pub async fn rename(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        name: &str,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        let query = format!(
            "UPDATE filter_favorites SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_filter(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        filter_json: &serde_json::Value,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        let query = format!(
            "UPDATE filter_favorites SET filter_json = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(id)
            .bind(user_id)
            .bind(filter_json)
            .fetch_optional(pool)
            .await
    }

    /// Delete a favorite. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM filter_favorites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
