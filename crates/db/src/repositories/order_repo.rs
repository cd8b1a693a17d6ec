//! Repository for the `orders` table.

use sqlx::PgPool;

use super::contains_pattern;
use crate::models::order::{OrderEntity, OrderRow};
use crate::store::OrderQuery;

/// Column list for `orders` joined with `customers` and `projects`.
const COLUMNS: &str = "\
    o.id, o.number, o.title, o.status_id, o.order_date, \
    o.customer_id, c.number AS customer_number, c.name AS customer_name, \
    o.project_id, p.name AS project_name, \
    o.net_sum, o.invoiced_sum, o.positions, \
    o.deleted, o.tenant_id, o.created_at, o.updated_at";

/// Provides data access for orders.
pub struct OrderRepo;

impl OrderRepo {
    pub async fn list(pool: &PgPool, query: &OrderQuery) -> Result<Vec<OrderEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM orders o \
             LEFT JOIN customers c ON c.id = o.customer_id \
             LEFT JOIN projects p ON p.id = o.project_id \
             WHERE ($1::smallint IS NULL OR o.status_id = $1) \
               AND ($2::text IS NULL \
                    OR o.title ILIKE $4 \
                    OR o.number::text = $2) \
               AND ($3 OR NOT o.deleted) \
             ORDER BY o.number DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(query.status.map(|s| s.id()))
            .bind(query.search.as_deref())
            .bind(query.include_deleted)
            .bind(query.search.as_deref().map(contains_pattern))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(OrderEntity::from).collect())
    }
}
