//! Order, customer and project models.

use chrono::NaiveDate;
use pforge_core::mapping::EntityBase;
use pforge_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{OrderStatus, StatusId};
use super::{entity_base, reference_base};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerEntity {
    pub base: EntityBase,
    pub number: Option<i32>,
    pub name: Option<String>,
}
pforge_core::impl_record!(CustomerEntity, entity "Customer", [number, name]);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEntity {
    pub base: EntityBase,
    pub name: Option<String>,
}
pforge_core::impl_record!(ProjectEntity, entity "Project", [name]);

/// One line item of an order, stored inline as JSONB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPosition {
    pub number: i16,
    pub title: String,
    pub net_sum: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderEntity {
    pub base: EntityBase,
    pub number: Option<i32>,
    pub title: Option<String>,
    pub status: Option<OrderStatus>,
    pub order_date: Option<NaiveDate>,
    pub customer: Option<CustomerEntity>,
    pub project: Option<ProjectEntity>,
    pub net_sum: Option<Decimal>,
    pub invoiced_sum: Option<Decimal>,
    pub positions: Option<Vec<OrderPosition>>,
}
pforge_core::impl_record!(
    OrderEntity,
    entity "Order",
    [number, title, status, order_date, customer, project, net_sum, invoiced_sum, positions]
);

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row from `orders` joined with customer and project names.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: DbId,
    pub number: i32,
    pub title: String,
    pub status_id: StatusId,
    pub order_date: Option<NaiveDate>,
    pub customer_id: Option<DbId>,
    pub customer_number: Option<i32>,
    pub customer_name: Option<String>,
    pub project_id: Option<DbId>,
    pub project_name: Option<String>,
    pub net_sum: Option<Decimal>,
    pub invoiced_sum: Option<Decimal>,
    pub positions: sqlx::types::Json<Vec<OrderPosition>>,
    pub deleted: bool,
    pub tenant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<OrderRow> for OrderEntity {
    fn from(row: OrderRow) -> Self {
        let status = OrderStatus::from_id(row.status_id);
        if status.is_none() {
            tracing::warn!(order_id = row.id, status_id = row.status_id, "Unknown order status");
        }
        Self {
            base: entity_base(
                row.id,
                row.created_at,
                row.updated_at,
                row.deleted,
                row.tenant_id,
            ),
            number: Some(row.number),
            title: Some(row.title),
            status,
            order_date: row.order_date,
            customer: row.customer_id.map(|id| CustomerEntity {
                base: reference_base(id),
                number: row.customer_number,
                name: row.customer_name,
            }),
            project: row.project_id.map(|id| ProjectEntity {
                base: reference_base(id),
                name: row.project_name,
            }),
            net_sum: row.net_sum,
            invoiced_sum: row.invoiced_sum,
            positions: Some(row.positions.0),
        }
    }
}
