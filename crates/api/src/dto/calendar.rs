use pforge_core::types::{DbId, Timestamp};
use pforge_db::models::timesheet::TimesheetEntity;
use serde::Serialize;

/// An event as the client calendar widget consumes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Option<DbId>,
    pub title: String,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl From<&TimesheetEntity> for CalendarEvent {
    /// Titled by the task, falling back to the description.
    fn from(ts: &TimesheetEntity) -> Self {
        let title = ts
            .task
            .as_ref()
            .and_then(|t| t.title.clone())
            .or_else(|| ts.description.clone())
            .unwrap_or_default();
        Self {
            id: ts.base.id,
            title,
            start: ts.start_time,
            end: ts.stop_time,
            all_day: false,
            desc: ts.description.clone(),
        }
    }
}
