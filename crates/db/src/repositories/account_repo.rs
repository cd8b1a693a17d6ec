//! Repository for the `accounts` table.

use sqlx::PgPool;

use super::contains_pattern;
use crate::models::account::{AccountEntity, AccountRow};
use crate::store::AccountQuery;

/// Column list for `accounts` queries.
const COLUMNS: &str = "\
    id, number, name, description, status_id, \
    deleted, tenant_id, created_at, updated_at";

/// Provides data access for cost accounts.
pub struct AccountRepo;

impl AccountRepo {
    pub async fn list(
        pool: &PgPool,
        query: &AccountQuery,
    ) -> Result<Vec<AccountEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM accounts \
             WHERE ($1::smallint IS NULL OR status_id = $1) \
               AND ($2::text IS NULL \
                    OR number ILIKE $2 \
                    OR name ILIKE $2) \
               AND ($3 OR NOT deleted) \
             ORDER BY number"
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(query.status.map(|s| s.id()))
            .bind(query.search.as_deref().map(contains_pattern))
            .bind(query.include_deleted)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AccountEntity::from).collect())
    }
}
