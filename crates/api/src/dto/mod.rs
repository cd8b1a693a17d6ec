//! Transport DTOs for list rows.
//!
//! Each DTO mirrors a subset of its entity through the generic field copier
//! and adds presentation fields in its `enrich_from` hook. References to
//! other entities arrive identity-only; a DTO that needs their display data
//! expands them explicitly.

pub mod account;
pub mod calendar;
pub mod order;
pub mod refs;
pub mod timesheet;

pub use account::AccountDto;
pub use calendar::CalendarEvent;
pub use order::OrderDto;
pub use refs::{CustomerDto, ProjectDto, TaskDto};
pub use timesheet::TimesheetDto;
