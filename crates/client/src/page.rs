//! A list page instance: state plus the requests that change it.
//!
//! Each request is numbered when it starts. Several may be in flight at
//! once (e.g. a search typed while a reset is loading); the reducer merges
//! a response only into the slices that request is still the latest for.

use std::sync::atomic::{AtomicU64, Ordering};

use pforge_core::favorites::FavoriteAction;
use pforge_core::filter::Category;
use pforge_core::types::DbId;
use tokio::sync::Mutex;

use crate::action::{Action, Slice};
use crate::client::{ClientError, FavoriteRequest, FavoriteUpdate, ListPageClient};
use crate::reducer::reduce;
use crate::state::ListPageState;

pub struct ListPage {
    client: ListPageClient,
    category: Category,
    state: Mutex<ListPageState>,
    next_seq: AtomicU64,
}

impl ListPage {
    pub fn new(client: ListPageClient, category: Category) -> Self {
        Self {
            client,
            category,
            state: Mutex::new(ListPageState::default()),
            next_seq: AtomicU64::new(1),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ListPageState {
        self.state.lock().await.clone()
    }

    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(category = %self.category, action = action.kind(), "Dispatch");
        let mut state = self.state.lock().await;
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    async fn fail(&self, seq: u64, error: ClientError) {
        tracing::warn!(category = %self.category, seq, error = %error, "List page request failed");
        self.dispatch(Action::LoadFailure {
            seq,
            error: error.to_string(),
        })
        .await;
    }

    /// Bootstrap the page: layout, filter, rows and favorites.
    pub async fn load(&self) {
        let seq = self.next_seq();
        self.dispatch(Action::LoadBegin {
            seq,
            category: self.category.to_string(),
        })
        .await;

        match self.client.initial_list(self.category).await {
            Ok(initial) => {
                self.dispatch(Action::LoadSuccess {
                    seq,
                    filter: initial.filter,
                    ui: initial.ui,
                    data: initial.data_list,
                    filter_favorites: initial.filter_favorites,
                })
                .await
            }
            Err(e) => self.fail(seq, e).await,
        }
    }

    /// Edit one filter key locally. Nothing is sent until [`Self::update_data`].
    pub async fn set_filter(&self, id: &str, new_value: serde_json::Value) {
        self.dispatch(Action::filter_set(id, new_value)).await;
    }

    pub async fn reset_filter(&self) {
        let seq = self.next_seq();
        self.dispatch(Action::FilterResetBegin { seq }).await;

        match self.client.filter_reset(self.category).await {
            Ok(filter) => self.dispatch(Action::FilterResetSuccess { seq, filter }).await,
            Err(e) => self.fail(seq, e).await,
        }
    }

    /// Submit the current filter and replace the rows.
    pub async fn update_data(&self) {
        let seq = self.next_seq();
        self.dispatch(Action::DataUpdateBegin { seq }).await;
        let filter = self.state.lock().await.filter.clone();

        match self.client.list(self.category, &filter).await {
            Ok(data) => self.dispatch(Action::DataUpdateSuccess { seq, data }).await,
            Err(e) => self.fail(seq, e).await,
        }
    }

    /// Save the current filter as a favorite called `name`. The filter is
    /// sent unchanged; the name travels as `newName`.
    pub async fn create_favorite(&self, name: &str) {
        let filter = self.state.lock().await.filter.clone();
        self.favorite(
            FavoriteAction::Create,
            FavoriteRequest {
                new_name: Some(name.to_string()),
                body: Some(filter),
                ..Default::default()
            },
        )
        .await;
    }

    pub async fn select_favorite(&self, id: DbId) {
        self.favorite(
            FavoriteAction::Select,
            FavoriteRequest {
                id: Some(id),
                ..Default::default()
            },
        )
        .await;
    }

    pub async fn rename_favorite(&self, id: DbId, new_name: &str) {
        self.favorite(
            FavoriteAction::Rename,
            FavoriteRequest {
                id: Some(id),
                new_name: Some(new_name.to_string()),
                ..Default::default()
            },
        )
        .await;
    }

    pub async fn delete_favorite(&self, id: DbId) {
        self.favorite(
            FavoriteAction::Delete,
            FavoriteRequest {
                id: Some(id),
                ..Default::default()
            },
        )
        .await;
    }

    /// Overwrite the selected favorite with the current filter.
    pub async fn update_favorite(&self) {
        let filter = self.state.lock().await.filter.clone();
        self.favorite(
            FavoriteAction::Update,
            FavoriteRequest {
                body: Some(filter),
                ..Default::default()
            },
        )
        .await;
    }

    async fn favorite(&self, action: FavoriteAction, request: FavoriteRequest) {
        let seq = self.next_seq();
        let slices = match action {
            FavoriteAction::Select => vec![Slice::Data, Slice::Filter, Slice::FilterFavorites],
            _ => vec![Slice::FilterFavorites],
        };
        self.dispatch(Action::FavoriteBegin { seq, slices }).await;

        match self.client.favorite(self.category, action, &request).await {
            Ok(FavoriteUpdate {
                data,
                ui,
                filter,
                filter_favorites,
            }) => {
                self.dispatch(Action::FavoriteSuccess {
                    seq,
                    data,
                    ui,
                    filter,
                    filter_favorites,
                })
                .await
            }
            Err(e) => self.fail(seq, e).await,
        }
    }
}
