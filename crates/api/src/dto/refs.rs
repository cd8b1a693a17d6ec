//! Reference DTOs embedded in list rows.

use pforge_core::mapping::{DtoBase, HistorizableDto};
use pforge_db::models::order::{CustomerEntity, ProjectEntity};
use pforge_db::models::timesheet::TaskEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(flatten)]
    pub base: DtoBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
pforge_core::impl_record!(CustomerDto, dto "Customer", [number, name]);

impl HistorizableDto for CustomerDto {
    type Entity = CustomerEntity;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(flatten)]
    pub base: DtoBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
pforge_core::impl_record!(ProjectDto, dto "Project", [name]);

impl HistorizableDto for ProjectDto {
    type Entity = ProjectEntity;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    #[serde(flatten)]
    pub base: DtoBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
pforge_core::impl_record!(TaskDto, dto "Task", [title]);

impl HistorizableDto for TaskDto {
    type Entity = TaskEntity;
}
