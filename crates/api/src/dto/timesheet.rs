use pforge_core::mapping::{DtoBase, HistorizableDto};
use pforge_core::types::{DbId, Timestamp};
use pforge_db::models::timesheet::TimesheetEntity;
use serde::{Deserialize, Serialize};

use super::refs::TaskDto;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetDto {
    #[serde(flatten)]
    pub base: DtoBase,
    pub user_id: Option<DbId>,
    pub task: Option<TaskDto>,
    pub start_time: Option<Timestamp>,
    pub stop_time: Option<Timestamp>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    /// Booked duration as `h:mm`.
    pub duration: Option<String>,
}
pforge_core::impl_record!(
    TimesheetDto,
    dto "Timesheet",
    [user_id, task, start_time, stop_time, location, description, reference, duration]
);

impl HistorizableDto for TimesheetDto {
    type Entity = TimesheetEntity;

    fn enrich_from(&mut self, src: &TimesheetEntity) {
        // The table shows the task title, so expand the reference.
        self.task = src.task.as_ref().map(TaskDto::from_entity);
        self.duration = match (src.start_time, src.stop_time) {
            (Some(start), Some(stop)) if stop >= start => {
                let minutes = (stop - start).num_minutes();
                Some(format!("{}:{:02}", minutes / 60, minutes % 60))
            }
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pforge_core::mapping::EntityBase;
    use pforge_db::models::timesheet::TaskEntity;

    use super::*;

    #[test]
    fn expands_task_and_formats_duration() {
        let entity = TimesheetEntity {
            base: EntityBase {
                id: Some(5),
                ..Default::default()
            },
            user_id: Some(1),
            task: Some(TaskEntity {
                base: EntityBase {
                    id: Some(8),
                    ..Default::default()
                },
                title: Some("Support".into()),
            }),
            start_time: Some(Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap()),
            stop_time: Some(Utc.with_ymd_and_hms(2024, 1, 2, 10, 5, 0).unwrap()),
            description: Some("Hotline".into()),
            ..Default::default()
        };

        let dto = TimesheetDto::from_entity(&entity);
        assert_eq!(dto.base.id, Some(5));
        assert_eq!(dto.description.as_deref(), Some("Hotline"));
        assert_eq!(dto.duration.as_deref(), Some("2:05"));
        let task = dto.task.expect("task expanded");
        assert_eq!(task.base.id, Some(8));
        assert_eq!(task.title.as_deref(), Some("Support"));
    }
}
