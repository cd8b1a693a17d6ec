//! The per-(user, category) session filter and remembered favorite
//! selection, kept in the preference store.

use pforge_core::filter::{Category, ListFilter};
use pforge_core::legacy::LegacyCalendarFilter;
use pforge_core::types::DbId;
use pforge_db::store::Store;

use crate::error::{AppError, AppResult};
use crate::list_page::categories;

/// Preference-backed filter state of one user on one list page.
pub struct FilterState<'a> {
    store: &'a dyn Store,
    user_id: DbId,
    category: Category,
}

impl<'a> FilterState<'a> {
    pub fn new(store: &'a dyn Store, user_id: DbId, category: Category) -> Self {
        Self {
            store,
            user_id,
            category,
        }
    }

    /// The current filter: the stored one, a migrated legacy one, or the
    /// category default. Only a legacy migration writes anything.
    pub async fn load(&self) -> AppResult<ListFilter> {
        let key = self.category.filter_key();
        if let Some(value) = self.store.get_preference(self.user_id, key).await? {
            match serde_json::from_value::<ListFilter>(value) {
                Ok(filter) => return Ok(filter),
                Err(e) => {
                    tracing::warn!(
                        user_id = self.user_id,
                        key,
                        error = %e,
                        "Stored filter unreadable, using default",
                    );
                    return Ok(categories::default_filter(self.category));
                }
            }
        }

        match self.category.legacy_filter_key() {
            Some(legacy_key) => self.migrate_legacy(legacy_key).await,
            None => Ok(categories::default_filter(self.category)),
        }
    }

    /// Convert the old-format preference, if present, into the current
    /// key and drop the old one. Runs at most once per user.
    async fn migrate_legacy(&self, legacy_key: &str) -> AppResult<ListFilter> {
        let Some(old) = self.store.get_preference(self.user_id, legacy_key).await? else {
            return Ok(categories::default_filter(self.category));
        };

        let filter = match serde_json::from_value::<LegacyCalendarFilter>(old) {
            Ok(legacy) => legacy.into_filter(),
            Err(e) => {
                tracing::warn!(
                    user_id = self.user_id,
                    legacy_key,
                    error = %e,
                    "Legacy filter unreadable, discarding it",
                );
                categories::default_filter(self.category)
            }
        };

        self.save(&filter).await?;
        self.store
            .remove_preference(self.user_id, legacy_key)
            .await?;
        tracing::info!(
            user_id = self.user_id,
            from = legacy_key,
            to = self.category.filter_key(),
            "Migrated legacy filter",
        );
        Ok(filter)
    }

    pub async fn save(&self, filter: &ListFilter) -> AppResult<()> {
        let value = serde_json::to_value(filter)
            .map_err(|e| AppError::InternalError(format!("Failed to encode filter: {e}")))?;
        self.store
            .put_preference(self.user_id, self.category.filter_key(), &value)
            .await?;
        Ok(())
    }

    /// Discard the session filter and return the category default.
    pub async fn reset(&self) -> AppResult<ListFilter> {
        self.store
            .remove_preference(self.user_id, self.category.filter_key())
            .await?;
        Ok(categories::default_filter(self.category))
    }

    pub async fn selected_favorite(&self) -> AppResult<Option<DbId>> {
        let value = self
            .store
            .get_preference(self.user_id, &self.category.selected_favorite_key())
            .await?;
        Ok(value.and_then(|v| v.as_i64()))
    }

    pub async fn remember_favorite(&self, id: DbId) -> AppResult<()> {
        self.store
            .put_preference(
                self.user_id,
                &self.category.selected_favorite_key(),
                &serde_json::Value::from(id),
            )
            .await?;
        Ok(())
    }

    pub async fn forget_favorite(&self) -> AppResult<()> {
        self.store
            .remove_preference(self.user_id, &self.category.selected_favorite_key())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pforge_core::filter::ViewType;
    use pforge_core::legacy::LEGACY_CALENDAR_KEY;
    use pforge_db::memory::MemoryStore;
    use pforge_db::store::PreferenceStore;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn missing_filter_yields_default_without_writing() {
        let store = MemoryStore::new();
        let state = FilterState::new(&store, 1, Category::Timesheet);

        let filter = state.load().await.unwrap();
        assert_eq!(filter, categories::default_filter(Category::Timesheet));
        assert_eq!(
            store.get_preference(1, "timesheet.displaySettings").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn legacy_calendar_filter_is_migrated_once() {
        let store = MemoryStore::new();
        store
            .put_preference(1, LEGACY_CALENDAR_KEY, &json!({"viewType": "BASIC_DAY"}))
            .await
            .unwrap();
        let state = FilterState::new(&store, 1, Category::Calendar);

        let first = state.load().await.unwrap();
        assert_eq!(first.view_type, Some(ViewType::Day));
        assert_eq!(store.get_preference(1, LEGACY_CALENDAR_KEY).await.unwrap(), None);
        assert!(store
            .get_preference(1, "calendar.displaySettings")
            .await
            .unwrap()
            .is_some());

        let second = state.load().await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn unreadable_legacy_filter_is_replaced_by_default() {
        let store = MemoryStore::new();
        store
            .put_preference(1, LEGACY_CALENDAR_KEY, &json!({"viewType": 17}))
            .await
            .unwrap();
        let state = FilterState::new(&store, 1, Category::Calendar);

        let filter = state.load().await.unwrap();
        assert_eq!(filter, categories::default_filter(Category::Calendar));
        assert_eq!(store.get_preference(1, LEGACY_CALENDAR_KEY).await.unwrap(), None);
        assert!(store
            .get_preference(1, "calendar.displaySettings")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn favorite_selection_round_trips() {
        let store = MemoryStore::new();
        let state = FilterState::new(&store, 1, Category::Order);
        assert_eq!(state.selected_favorite().await.unwrap(), None);
        state.remember_favorite(12).await.unwrap();
        assert_eq!(state.selected_favorite().await.unwrap(), Some(12));
        state.forget_favorite().await.unwrap();
        assert_eq!(state.selected_favorite().await.unwrap(), None);
    }
}
