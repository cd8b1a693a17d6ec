//! Per-category defaults, layouts and row queries.

use chrono::NaiveDate;
use pforge_core::filter::{Category, ListFilter, ViewType};
use pforge_core::mapping::HistorizableDto;
use pforge_core::types::DbId;
use pforge_core::ui::{Formatter, UiFilterField, UiLayout, UiTable, Widget};
use pforge_db::models::status::{AccountStatus, OrderStatus};
use pforge_db::store::{AccountQuery, OrderQuery, Store, TimesheetQuery};
use serde::Serialize;

use crate::dto::{AccountDto, CalendarEvent, OrderDto, TimesheetDto};
use crate::error::{AppError, AppResult};

/// The filter a user starts with, and returns to on reset.
pub fn default_filter(category: Category) -> ListFilter {
    let mut filter = ListFilter::for_category(category);
    if category == Category::Calendar {
        filter.view_type = Some(ViewType::Month);
    }
    filter
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

fn status_options<S: Copy>(all: &[S], wire: fn(S) -> &'static str) -> Vec<(&'static str, &'static str)> {
    all.iter().map(|s| (wire(*s), wire(*s))).collect()
}

/// UI descriptor for the list page of `category`.
pub fn ui_layout(category: Category) -> UiLayout {
    let search = UiFilterField::new("searchString", "Search", Widget::Text);
    let show_deleted = UiFilterField::new("showDeleted", "Show deleted", Widget::Checkbox);

    let layout = match category {
        Category::Timesheet => UiLayout::new("Timesheets")
            .add_table(
                UiTable::result_set()
                    .add_column("startTime", "Start", Some(Formatter::Timestamp))
                    .add_column("stopTime", "Stop", Some(Formatter::Timestamp))
                    .add_column("duration", "Duration", None)
                    .add_column("task.title", "Task", None)
                    .add_column("location", "Location", None)
                    .add_column("description", "Description", None),
            )
            .add_filter_field(UiFilterField::new("start", "From", Widget::Date))
            .add_filter_field(UiFilterField::new("end", "Until", Widget::Date))
            .add_filter_field(search)
            .add_filter_field(show_deleted),
        Category::Calendar => UiLayout::new("Calendar")
            .add_table(
                UiTable::result_set()
                    .add_column("start", "Start", Some(Formatter::Timestamp))
                    .add_column("end", "End", Some(Formatter::Timestamp))
                    .add_column("title", "Title", None),
            )
            .add_filter_field(UiFilterField::new(
                "viewType",
                "View",
                Widget::select(&[
                    ("month", "Month"),
                    ("week", "Week"),
                    ("day", "Day"),
                    ("agenda", "Agenda"),
                ]),
            ))
            .add_filter_field(UiFilterField::new("start", "Date", Widget::Date)),
        Category::Order => {
            let statuses = status_options(OrderStatus::ALL, OrderStatus::as_str);
            UiLayout::new("Orders")
                .add_table(
                    UiTable::result_set()
                        .add_column("number", "Number", Some(Formatter::Number))
                        .add_column("customer.name", "Customer", None)
                        .add_column("project.name", "Project", None)
                        .add_column("title", "Title", None)
                        .add_column("pos", "Positions", None)
                        .add_column("formattedNetSum", "Net sum", Some(Formatter::Currency))
                        .add_column("status", "Status", None)
                        .add_column("orderDate", "Date", Some(Formatter::Date)),
                )
                .add_filter_field(search)
                .add_filter_field(UiFilterField::new(
                    "status",
                    "Status",
                    Widget::select(&statuses),
                ))
                .add_filter_field(show_deleted)
        }
        Category::Account => {
            let statuses = status_options(AccountStatus::ALL, AccountStatus::as_str);
            UiLayout::new("Cost accounts")
                .add_table(
                    UiTable::result_set()
                        .add_column("number", "Number", None)
                        .add_column("name", "Name", None)
                        .add_column("description", "Description", None)
                        .add_column("status", "Status", None)
                        .add_column("lastUpdate", "Modified", Some(Formatter::Timestamp)),
                )
                .add_filter_field(search)
                .add_filter_field(UiFilterField::new(
                    "status",
                    "Status",
                    Widget::select(&statuses),
                ))
                .add_filter_field(show_deleted)
        }
    };

    layout
        .add_translation("reset", "Reset")
        .add_translation("search", "Search")
        .add_translation("favorites", "Favorites")
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

fn to_rows<T: Serialize>(items: &[T]) -> AppResult<Vec<serde_json::Value>> {
    items
        .iter()
        .map(|item| {
            serde_json::to_value(item)
                .map_err(|e| AppError::InternalError(format!("Failed to encode row: {e}")))
        })
        .collect()
}

/// Parse an optional status constraint from the filter's extra keys.
fn status_constraint<S>(filter: &ListFilter) -> AppResult<Option<S>>
where
    S: std::str::FromStr<Err = pforge_core::error::CoreError>,
{
    filter
        .extra_str("status")
        .map(str::parse::<S>)
        .transpose()
        .map_err(AppError::from)
}

/// Query the entities a filter selects and convert them into list rows.
pub async fn query_rows(
    store: &dyn Store,
    user_id: DbId,
    category: Category,
    filter: &ListFilter,
    today: NaiveDate,
) -> AppResult<Vec<serde_json::Value>> {
    let search = filter.search().map(str::to_string);

    match category {
        Category::Timesheet => {
            let query = TimesheetQuery {
                user_id,
                start: filter.start,
                end: filter.end,
                search,
                include_deleted: filter.show_deleted,
            };
            let entities = store.list_timesheets(&query).await?;
            let dtos: Vec<TimesheetDto> = entities.iter().map(TimesheetDto::from_entity).collect();
            tracing::debug!(user_id, count = dtos.len(), "Timesheet rows loaded");
            to_rows(&dtos)
        }
        Category::Calendar => {
            let (start, end) = filter.calendar_window(today);
            let query = TimesheetQuery {
                user_id,
                start: Some(start),
                end: Some(end),
                search,
                include_deleted: false,
            };
            let entities = store.list_timesheets(&query).await?;
            let events: Vec<CalendarEvent> = entities.iter().map(CalendarEvent::from).collect();
            tracing::debug!(user_id, %start, %end, count = events.len(), "Calendar events loaded");
            to_rows(&events)
        }
        Category::Order => {
            let query = OrderQuery {
                status: status_constraint::<OrderStatus>(filter)?,
                search,
                include_deleted: filter.show_deleted,
            };
            let entities = store.list_orders(&query).await?;
            let dtos: Vec<OrderDto> = entities.iter().map(OrderDto::from_entity).collect();
            tracing::debug!(count = dtos.len(), "Order rows loaded");
            to_rows(&dtos)
        }
        Category::Account => {
            let query = AccountQuery {
                status: status_constraint::<AccountStatus>(filter)?,
                search,
                include_deleted: filter.show_deleted,
            };
            let entities = store.list_accounts(&query).await?;
            let dtos: Vec<AccountDto> = entities.iter().map(AccountDto::from_entity).collect();
            tracing::debug!(count = dtos.len(), "Account rows loaded");
            to_rows(&dtos)
        }
    }
}
