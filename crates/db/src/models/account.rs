//! Cost account models.

use pforge_core::mapping::EntityBase;
use pforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::entity_base;
use super::status::{AccountStatus, StatusId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountEntity {
    pub base: EntityBase,
    pub number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<AccountStatus>,
}
pforge_core::impl_record!(AccountEntity, entity "Account", [number, name, description, status]);

/// A row from the `accounts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: DbId,
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    pub status_id: StatusId,
    pub deleted: bool,
    pub tenant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AccountRow> for AccountEntity {
    fn from(row: AccountRow) -> Self {
        Self {
            base: entity_base(
                row.id,
                row.created_at,
                row.updated_at,
                row.deleted,
                row.tenant_id,
            ),
            number: Some(row.number),
            name: Some(row.name),
            description: row.description,
            status: AccountStatus::from_id(row.status_id),
        }
    }
}
