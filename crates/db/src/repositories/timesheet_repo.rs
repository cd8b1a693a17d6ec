//! Repository for the `timesheets` table.

use sqlx::PgPool;

use super::contains_pattern;
use crate::models::timesheet::{TimesheetEntity, TimesheetRow};
use crate::store::TimesheetQuery;

/// Column list for `timesheets` joined with `tasks`.
const COLUMNS: &str = "\
    t.id, t.user_id, t.task_id, k.title AS task_title, \
    t.start_time, t.stop_time, t.location, t.description, t.reference, \
    t.deleted, t.tenant_id, t.created_at, t.updated_at";

/// Provides data access for timesheets.
pub struct TimesheetRepo;

impl TimesheetRepo {
    /// List a user's timesheets whose start date lies in the query window.
    pub async fn list(
        pool: &PgPool,
        query: &TimesheetQuery,
    ) -> Result<Vec<TimesheetEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM timesheets t \
             LEFT JOIN tasks k ON k.id = t.task_id \
             WHERE t.user_id = $1 \
               AND ($2::date IS NULL OR (t.start_time AT TIME ZONE 'UTC')::date >= $2) \
               AND ($3::date IS NULL OR (t.start_time AT TIME ZONE 'UTC')::date <= $3) \
               AND ($4::text IS NULL \
                    OR t.description ILIKE $4 \
                    OR t.location ILIKE $4) \
               AND ($5 OR NOT t.deleted) \
             ORDER BY t.start_time"
        );
        let rows = sqlx::query_as::<_, TimesheetRow>(&sql)
            .bind(query.user_id)
            .bind(query.start)
            .bind(query.end)
            .bind(query.search.as_deref().map(contains_pattern))
            .bind(query.include_deleted)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(TimesheetEntity::from).collect())
    }
}
