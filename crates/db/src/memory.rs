//! In-process [`Store`](crate::store::Store) for development and tests.
//!
//! Mirrors the PostgreSQL semantics (ordering, user scoping, soft deletes)
//! closely enough that the HTTP layer cannot tell the two apart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pforge_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::account::AccountEntity;
use crate::models::favorite::{CreateFavorite, Favorite};
use crate::models::order::OrderEntity;
use crate::models::timesheet::TimesheetEntity;
use crate::store::{
    AccountQuery, EntityStore, FavoriteStore, OrderQuery, PreferenceStore, Store, TimesheetQuery,
};
use crate::DbResult;

#[derive(Default)]
struct Tables {
    preferences: HashMap<(DbId, String), serde_json::Value>,
    favorites: Vec<Favorite>,
    timesheets: Vec<TimesheetEntity>,
    orders: Vec<OrderEntity>,
    accounts: Vec<AccountEntity>,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    next_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Store a timesheet, assigning an id if it has none. Returns the id.
    pub async fn insert_timesheet(&self, mut timesheet: TimesheetEntity) -> DbId {
        let id = *timesheet.base.id.get_or_insert_with(|| self.allocate_id());
        self.tables.write().await.timesheets.push(timesheet);
        id
    }

    pub async fn insert_order(&self, mut order: OrderEntity) -> DbId {
        let id = *order.base.id.get_or_insert_with(|| self.allocate_id());
        self.tables.write().await.orders.push(order);
        id
    }

    pub async fn insert_account(&self, mut account: AccountEntity) -> DbId {
        let id = *account.base.id.get_or_insert_with(|| self.allocate_id());
        self.tables.write().await.accounts.push(account);
        id
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get_preference(&self, user_id: DbId, key: &str) -> DbResult<Option<serde_json::Value>> {
        let tables = self.tables.read().await;
        Ok(tables.preferences.get(&(user_id, key.to_string())).cloned())
    }

    async fn put_preference(
        &self,
        user_id: DbId,
        key: &str,
        value: &serde_json::Value,
    ) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .preferences
            .insert((user_id, key.to_string()), value.clone());
        Ok(())
    }

    async fn remove_preference(&self, user_id: DbId, key: &str) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .preferences
            .remove(&(user_id, key.to_string()))
            .is_some())
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn list_favorites(&self, user_id: DbId, category: &str) -> DbResult<Vec<Favorite>> {
        let tables = self.tables.read().await;
        let mut favorites: Vec<Favorite> = tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id && f.category == category)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(favorites)
    }

    async fn find_favorite(&self, user_id: DbId, id: DbId) -> DbResult<Option<Favorite>> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .find(|f| f.id == id && f.user_id == user_id)
            .cloned())
    }

    async fn create_favorite(&self, user_id: DbId, input: &CreateFavorite) -> DbResult<Favorite> {
        let now = Utc::now();
        let favorite = Favorite {
            id: self.allocate_id(),
            user_id,
            category: input.category.clone(),
            name: input.name.clone(),
            filter_json: input.filter_json.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn rename_favorite(
        &self,
        user_id: DbId,
        id: DbId,
        name: &str,
    ) -> DbResult<Option<Favorite>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .favorites
            .iter_mut()
            .find(|f| f.id == id && f.user_id == user_id)
            .map(|f| {
                f.name = name.to_string();
                f.updated_at = Utc::now();
                f.clone()
            }))
    }

    async fn update_favorite_filter(
        &self,
        user_id: DbId,
        id: DbId,
        filter_json: &serde_json::Value,
    ) -> DbResult<Option<Favorite>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .favorites
            .iter_mut()
            .find(|f| f.id == id && f.user_id == user_id)
            .map(|f| {
                f.filter_json = filter_json.clone();
                f.updated_at = Utc::now();
                f.clone()
            }))
    }

    async fn delete_favorite(&self, user_id: DbId, id: DbId) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|f| !(f.id == id && f.user_id == user_id));
        Ok(tables.favorites.len() < before)
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn list_timesheets(&self, query: &TimesheetQuery) -> DbResult<Vec<TimesheetEntity>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<TimesheetEntity> = tables
            .timesheets
            .iter()
            .filter(|ts| query.matches(ts))
            .cloned()
            .collect();
        rows.sort_by_key(|ts| ts.start_time);
        Ok(rows)
    }

    async fn list_orders(&self, query: &OrderQuery) -> DbResult<Vec<OrderEntity>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<OrderEntity> = tables
            .orders
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.number.cmp(&a.number));
        Ok(rows)
    }

    async fn list_accounts(&self, query: &AccountQuery) -> DbResult<Vec<AccountEntity>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AccountEntity> = tables
            .accounts
            .iter()
            .filter(|a| query.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(rows)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }
}
