//! PostgreSQL-backed [`Store`](crate::store::Store).

use async_trait::async_trait;
use pforge_core::types::DbId;

use crate::models::account::AccountEntity;
use crate::models::favorite::{CreateFavorite, Favorite};
use crate::models::order::OrderEntity;
use crate::models::timesheet::TimesheetEntity;
use crate::repositories::{AccountRepo, FavoriteRepo, OrderRepo, PreferenceRepo, TimesheetRepo};
use crate::store::{
    AccountQuery, EntityStore, FavoriteStore, OrderQuery, PreferenceStore, Store, TimesheetQuery,
};
use crate::{DbPool, DbResult};

/// Thin adapter from the storage traits onto the repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PreferenceStore for PgStore {
    async fn get_preference(&self, user_id: DbId, key: &str) -> DbResult<Option<serde_json::Value>> {
        PreferenceRepo::get(&self.pool, user_id, key).await
    }

    async fn put_preference(
        &self,
        user_id: DbId,
        key: &str,
        value: &serde_json::Value,
    ) -> DbResult<()> {
        PreferenceRepo::upsert(&self.pool, user_id, key, value).await
    }

    async fn remove_preference(&self, user_id: DbId, key: &str) -> DbResult<bool> {
        PreferenceRepo::delete(&self.pool, user_id, key).await
    }
}

#[async_trait]
impl FavoriteStore for PgStore {
    async fn list_favorites(&self, user_id: DbId, category: &str) -> DbResult<Vec<Favorite>> {
        FavoriteRepo::list(&self.pool, user_id, category).await
    }

    async fn find_favorite(&self, user_id: DbId, id: DbId) -> DbResult<Option<Favorite>> {
        FavoriteRepo::find_by_id(&self.pool, user_id, id).await
    }

    async fn create_favorite(&self, user_id: DbId, input: &CreateFavorite) -> DbResult<Favorite> {
        FavoriteRepo::create(&self.pool, user_id, input).await
    }

    async fn rename_favorite(
        &self,
        user_id: DbId,
        id: DbId,
        name: &str,
    ) -> DbResult<Option<Favorite>> {
        FavoriteRepo::rename(&self.pool, user_id, id, name).await
    }

    async fn update_favorite_filter(
        &self,
        user_id: DbId,
        id: DbId,
        filter_json: &serde_json::Value,
    ) -> DbResult<Option<Favorite>> {
        FavoriteRepo::update_filter(&self.pool, user_id, id, filter_json).await
    }

    async fn delete_favorite(&self, user_id: DbId, id: DbId) -> DbResult<bool> {
        FavoriteRepo::delete(&self.pool, user_id, id).await
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn list_timesheets(&self, query: &TimesheetQuery) -> DbResult<Vec<TimesheetEntity>> {
        TimesheetRepo::list(&self.pool, query).await
    }

    async fn list_orders(&self, query: &OrderQuery) -> DbResult<Vec<OrderEntity>> {
        OrderRepo::list(&self.pool, query).await
    }

    async fn list_accounts(&self, query: &AccountQuery) -> DbResult<Vec<AccountEntity>> {
        AccountRepo::list(&self.pool, query).await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> DbResult<()> {
        crate::health_check(&self.pool).await
    }
}
