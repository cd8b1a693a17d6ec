//! Timesheet and task models.

use pforge_core::mapping::EntityBase;
use pforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::{entity_base, reference_base};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEntity {
    pub base: EntityBase,
    pub title: Option<String>,
}
pforge_core::impl_record!(TaskEntity, entity "Task", [title]);

/// A booked time span of one user on one task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimesheetEntity {
    pub base: EntityBase,
    pub user_id: Option<DbId>,
    pub task: Option<TaskEntity>,
    pub start_time: Option<Timestamp>,
    pub stop_time: Option<Timestamp>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}
pforge_core::impl_record!(
    TimesheetEntity,
    entity "Timesheet",
    [user_id, task, start_time, stop_time, location, description, reference]
);

impl TimesheetEntity {
    /// Calendar date the entry is listed under.
    pub fn start_date(&self) -> Option<chrono::NaiveDate> {
        self.start_time.map(|t| t.date_naive())
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row from `timesheets` joined with its task title.
#[derive(Debug, Clone, FromRow)]
pub struct TimesheetRow {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: Option<DbId>,
    pub task_title: Option<String>,
    pub start_time: Timestamp,
    pub stop_time: Timestamp,
    pub location: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub deleted: bool,
    pub tenant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TimesheetRow> for TimesheetEntity {
    fn from(row: TimesheetRow) -> Self {
        Self {
            base: entity_base(
                row.id,
                row.created_at,
                row.updated_at,
                row.deleted,
                row.tenant_id,
            ),
            user_id: Some(row.user_id),
            task: row.task_id.map(|id| TaskEntity {
                base: reference_base(id),
                title: row.task_title,
            }),
            start_time: Some(row.start_time),
            stop_time: Some(row.stop_time),
            location: row.location,
            description: row.description,
            reference: row.reference,
        }
    }
}
