//! Repository for the `user_preferences` table.
//!
//! Values are opaque JSON documents addressed by `(user_id, pref_key)`.

use pforge_core::types::DbId;
use sqlx::PgPool;

/// Provides data access for per-user preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value_json FROM user_preferences WHERE user_id = $1 AND pref_key = $2",
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(pool)
        .await
    }

    /// Insert or replace a preference value.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_preferences (user_id, pref_key, value_json) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, pref_key) DO UPDATE SET \
                 value_json = EXCLUDED.value_json, \
                 updated_at = NOW()",
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a preference. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, key: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_preferences WHERE user_id = $1 AND pref_key = $2")
                .bind(user_id)
                .bind(key)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
