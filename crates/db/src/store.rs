//! Storage interfaces the API layer is written against.
//!
//! Preferences and favorites are always scoped by the owning user id, which
//! callers pass explicitly; there is no ambient "current user".

use async_trait::async_trait;
use chrono::NaiveDate;
use pforge_core::filter::within_window;
use pforge_core::types::DbId;

use crate::models::account::AccountEntity;
use crate::models::favorite::{CreateFavorite, Favorite};
use crate::models::order::OrderEntity;
use crate::models::status::{AccountStatus, OrderStatus};
use crate::models::timesheet::TimesheetEntity;
use crate::DbResult;

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Timesheets of one user, optionally bounded by an inclusive date window
/// on the start date.
#[derive(Debug, Clone, Default)]
pub struct TimesheetQuery {
    pub user_id: DbId,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Case-insensitive substring match on description or location.
    /// `%` and `_` are plain characters.
    pub search: Option<String>,
    pub include_deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    /// Case-insensitive match on title, or exact match on the order number.
    pub search: Option<String>,
    pub include_deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AccountQuery {
    pub status: Option<AccountStatus>,
    /// Case-insensitive match on number or name.
    pub search: Option<String>,
    pub include_deleted: bool,
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

impl TimesheetQuery {
    pub fn matches(&self, ts: &TimesheetEntity) -> bool {
        if ts.user_id != Some(self.user_id) || (ts.base.deleted && !self.include_deleted) {
            return false;
        }
        let Some(date) = ts.start_date() else {
            return false;
        };
        within_window(date, self.start, self.end)
            && self.search.as_deref().map_or(true, |s| {
                contains_ci(ts.description.as_deref(), s) || contains_ci(ts.location.as_deref(), s)
            })
    }
}

impl OrderQuery {
    pub fn matches(&self, order: &OrderEntity) -> bool {
        if order.base.deleted && !self.include_deleted {
            return false;
        }
        if self.status.is_some() && order.status != self.status {
            return false;
        }
        self.search.as_deref().map_or(true, |s| {
            contains_ci(order.title.as_deref(), s)
                || order.number.map(|n| n.to_string()).as_deref() == Some(s)
        })
    }
}

impl AccountQuery {
    pub fn matches(&self, account: &AccountEntity) -> bool {
        if account.base.deleted && !self.include_deleted {
            return false;
        }
        if self.status.is_some() && account.status != self.status {
            return false;
        }
        self.search.as_deref().map_or(true, |s| {
            contains_ci(account.number.as_deref(), s) || contains_ci(account.name.as_deref(), s)
        })
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Per-user key/value preference storage.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get_preference(&self, user_id: DbId, key: &str) -> DbResult<Option<serde_json::Value>>;

    /// Insert or replace the value under `key`.
    async fn put_preference(
        &self,
        user_id: DbId,
        key: &str,
        value: &serde_json::Value,
    ) -> DbResult<()>;

    /// Remove `key`. Returns whether a value was stored.
    async fn remove_preference(&self, user_id: DbId, key: &str) -> DbResult<bool>;
}

/// Named filter snapshots, owned by one user and one category.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Favorites of a user in a category, ordered by name.
    async fn list_favorites(&self, user_id: DbId, category: &str) -> DbResult<Vec<Favorite>>;

    async fn find_favorite(&self, user_id: DbId, id: DbId) -> DbResult<Option<Favorite>>;

    async fn create_favorite(&self, user_id: DbId, input: &CreateFavorite) -> DbResult<Favorite>;

    /// Returns `None` if no such favorite belongs to the user.
    async fn rename_favorite(
        &self,
        user_id: DbId,
        id: DbId,
        name: &str,
    ) -> DbResult<Option<Favorite>>;

    /// Returns `None` if no such favorite belongs to the user.
    async fn update_favorite_filter(
        &self,
        user_id: DbId,
        id: DbId,
        filter_json: &serde_json::Value,
    ) -> DbResult<Option<Favorite>>;

    /// Returns whether a favorite was removed.
    async fn delete_favorite(&self, user_id: DbId, id: DbId) -> DbResult<bool>;
}

/// Read access to the entities list pages show.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Ordered by start time.
    async fn list_timesheets(&self, query: &TimesheetQuery) -> DbResult<Vec<TimesheetEntity>>;

    /// Ordered by number, newest first.
    async fn list_orders(&self, query: &OrderQuery) -> DbResult<Vec<OrderEntity>>;

    /// Ordered by number.
    async fn list_accounts(&self, query: &AccountQuery) -> DbResult<Vec<AccountEntity>>;
}

/// Everything the API needs from storage.
#[async_trait]
pub trait Store: PreferenceStore + FavoriteStore + EntityStore {
    async fn health_check(&self) -> DbResult<()>;
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pforge_core::mapping::EntityBase;

    use super::*;

    fn timesheet(day: u32, description: &str) -> TimesheetEntity {
        TimesheetEntity {
            user_id: Some(1),
            start_time: Some(Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    #[test]
    fn timesheet_window_is_inclusive() {
        let query = TimesheetQuery {
            user_id: 1,
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: NaiveDate::from_ymd_opt(2024, 1, 7),
            ..Default::default()
        };
        assert!(query.matches(&timesheet(1, "a")));
        assert!(query.matches(&timesheet(7, "a")));
        assert!(!query.matches(&timesheet(8, "a")));
    }

    #[test]
    fn timesheet_of_other_user_never_matches() {
        let query = TimesheetQuery {
            user_id: 2,
            ..Default::default()
        };
        assert!(!query.matches(&timesheet(1, "a")));
    }

    #[test]
    fn deleted_rows_need_opt_in() {
        let mut ts = timesheet(3, "a");
        ts.base = EntityBase {
            deleted: true,
            ..Default::default()
        };
        let mut query = TimesheetQuery {
            user_id: 1,
            ..Default::default()
        };
        assert!(!query.matches(&ts));
        query.include_deleted = true;
        assert!(query.matches(&ts));
    }

    #[test]
    fn search_is_case_insensitive() {
        let query = TimesheetQuery {
            user_id: 1,
            search: Some("REVIEW".into()),
            ..Default::default()
        };
        assert!(query.matches(&timesheet(2, "Code review")));
        assert!(!query.matches(&timesheet(2, "Planning")));
    }

    #[test]
    fn order_search_matches_number_exactly() {
        let order = OrderEntity {
            number: Some(42),
            title: Some("Website".into()),
            status: Some(OrderStatus::Ordered),
            ..Default::default()
        };
        let by_number = OrderQuery {
            search: Some("42".into()),
            ..Default::default()
        };
        assert!(by_number.matches(&order));
        let by_status = OrderQuery {
            status: Some(OrderStatus::Rejected),
            ..Default::default()
        };
        assert!(!by_status.matches(&order));
    }
}
