//! Domain model structs.
//!
//! Each submodule contains:
//! - the entity (system-of-record shape, registered with `impl_record!`)
//! - a `FromRow` row struct matching the joined database query
//! - the conversion from row into entity

use pforge_core::mapping::{EntityBase, TenantRef};
use pforge_core::types::{DbId, Timestamp};

pub mod account;
pub mod favorite;
pub mod order;
pub mod status;
pub mod timesheet;

/// Bookkeeping columns as they come out of every entity table.
pub(crate) fn entity_base(
    id: DbId,
    created_at: Timestamp,
    updated_at: Timestamp,
    deleted: bool,
    tenant_id: Option<DbId>,
) -> EntityBase {
    EntityBase {
        id: Some(id),
        created: Some(created_at),
        deleted,
        last_update: Some(updated_at),
        tenant: tenant_id.map(|id| TenantRef { id: Some(id) }),
    }
}

/// Identity-only reference built from a joined `(id, ...)` column group.
pub(crate) fn reference_base(id: DbId) -> EntityBase {
    EntityBase {
        id: Some(id),
        ..Default::default()
    }
}
