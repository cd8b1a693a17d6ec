use std::collections::HashMap;

use pforge_core::favorites::FavoriteSummary;
use pforge_core::ui::UiLayout;
use serde::{Deserialize, Serialize};

use crate::action::Slice;

/// A list filter as the page edits it: a plain JSON object.
pub type Filter = serde_json::Map<String, serde_json::Value>;

/// Request lifecycle of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
    pub column: String,
    pub direction: SortDirection,
}

/// State of one list page instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPageState {
    pub status: Status,
    pub error: Option<String>,
    pub category: String,
    pub ui: Option<UiLayout>,
    pub filter: Filter,
    pub data: Vec<serde_json::Value>,
    pub filter_favorites: Vec<FavoriteSummary>,
    pub sorting: Option<Sorting>,
    /// Latest request issued per slice.
    #[serde(skip)]
    pub(crate) slice_seq: HashMap<Slice, u64>,
    /// Latest request issued overall.
    #[serde(skip)]
    pub(crate) latest_seq: u64,
}

impl ListPageState {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Whether a response of request `seq` may replace `slice`.
    pub(crate) fn owns(&self, slice: Slice, seq: u64) -> bool {
        self.slice_seq.get(&slice) == Some(&seq)
    }
}
