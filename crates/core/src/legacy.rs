//! The pre-6.x calendar preference shape and its one-way conversion into a
//! current [`ListFilter`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::{Category, ListFilter, ViewType};
use crate::types::DbId;

/// Preference key the old calendar page stored its settings under.
pub const LEGACY_CALENDAR_KEY: &str = "TeamCalendarPage.userPrefs";

/// View modes of the old calendar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyViewType {
    Month,
    AgendaWeek,
    BasicWeek,
    AgendaDay,
    BasicDay,
}

impl From<LegacyViewType> for ViewType {
    fn from(view: LegacyViewType) -> Self {
        match view {
            LegacyViewType::Month => ViewType::Month,
            LegacyViewType::AgendaWeek | LegacyViewType::BasicWeek => ViewType::Week,
            LegacyViewType::AgendaDay | LegacyViewType::BasicDay => ViewType::Day,
        }
    }
}

/// Stored value under [`LEGACY_CALENDAR_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCalendarFilter {
    #[serde(default)]
    pub view_type: Option<LegacyViewType>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub first_hour: Option<u8>,
    #[serde(default)]
    pub show_breaks: Option<bool>,
    #[serde(default)]
    pub show_planning: Option<bool>,
    #[serde(default)]
    pub timesheet_user_id: Option<DbId>,
}

impl LegacyCalendarFilter {
    /// Build the current-shape calendar filter. Display options the list
    /// filter does not model are kept as extra keys.
    pub fn into_filter(self) -> ListFilter {
        let mut filter = ListFilter::for_category(Category::Calendar);
        filter.view_type = Some(self.view_type.map_or(ViewType::Month, ViewType::from));
        filter.start = self.start_date;

        let extras = [
            ("firstHour", self.first_hour.map(serde_json::Value::from)),
            ("showBreaks", self.show_breaks.map(serde_json::Value::from)),
            ("showPlanning", self.show_planning.map(serde_json::Value::from)),
            (
                "timesheetUserId",
                self.timesheet_user_id.map(serde_json::Value::from),
            ),
        ];
        for (key, value) in extras {
            if let Some(value) = value {
                filter.extra.insert(key.to_string(), value);
            }
        }
        filter
    }
}
