//! List categories and the serializable list filter.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Categories
   -------------------------------------------------------------------------- */

/// The entity type a list page, its filter, and its favorites belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Timesheet,
    Calendar,
    Order,
    Account,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Timesheet,
        Category::Calendar,
        Category::Order,
        Category::Account,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Timesheet => "timesheet",
            Category::Calendar => "calendar",
            Category::Order => "order",
            Category::Account => "account",
        }
    }

    /// Preference key holding the user's current filter for this category.
    pub fn filter_key(self) -> &'static str {
        match self {
            Category::Timesheet => "timesheet.displaySettings",
            Category::Calendar => "calendar.displaySettings",
            Category::Order => "order.displaySettings",
            Category::Account => "account.displaySettings",
        }
    }

    /// Preference key remembering the last selected favorite.
    pub fn selected_favorite_key(self) -> String {
        format!("{}.selectedFavorite", self.as_str())
    }

    /// Preference key of the pre-migration filter format, if any.
    pub fn legacy_filter_key(self) -> Option<&'static str> {
        match self {
            Category::Calendar => Some(crate::legacy::LEGACY_CALENDAR_KEY),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/* --------------------------------------------------------------------------
   View type
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Month,
    Week,
    Day,
    Agenda,
}

/// Inclusive date window shown by a calendar view anchored at `anchor`.
///
/// Weeks start on Monday. Agenda shows the whole month like month view.
pub fn view_window(view: ViewType, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    match view {
        ViewType::Day => (anchor, anchor),
        ViewType::Week => {
            let offset = u64::from(anchor.weekday().num_days_from_monday());
            let monday = anchor - Days::new(offset);
            (monday, monday + Days::new(6))
        }
        ViewType::Month | ViewType::Agenda => {
            let first = anchor.with_day(1).unwrap_or(anchor);
            let next_month = first
                .checked_add_months(chrono::Months::new(1))
                .unwrap_or(first);
            let last = next_month.pred_opt().unwrap_or(first);
            (first, last)
        }
    }
}

/* --------------------------------------------------------------------------
   Filter
   -------------------------------------------------------------------------- */

/// Query constraints for one list page.
///
/// Keys not modelled here (e.g. `status`) are kept in `extra` and written
/// back unchanged, so a stored filter always reads back deep-equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_type: Option<ViewType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_deleted: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ListFilter {
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Bind the filter to `category`, rejecting filters that name another
    /// category or carry an inverted date range.
    pub fn scoped_to(mut self, category: Category) -> Result<Self, CoreError> {
        if let Some(ref named) = self.category {
            if named != category.as_str() {
                return Err(CoreError::Validation(format!(
                    "Filter belongs to category '{named}', not '{category}'"
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(CoreError::Validation(format!(
                    "Filter start {start} is after end {end}"
                )));
            }
        }
        self.category = Some(category.as_str().to_string());
        Ok(self)
    }

    /// Trimmed, non-empty free-text search.
    pub fn search(&self) -> Option<&str> {
        self.search_string
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A category-specific string constraint such as `status`.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Inclusive date window: explicit bounds win, otherwise the calendar
    /// view window around `start` (or `today`).
    pub fn calendar_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            (start, _) => view_window(
                self.view_type.unwrap_or(ViewType::Month),
                start.unwrap_or(today),
            ),
        }
    }
}

/// Whether `date` lies inside the inclusive `[start, end]` window. Open
/// bounds match everything on that side.
pub fn within_window(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}
