//! Actions dispatched against a list page.
//!
//! Serialized in the Redux shape `{ "type": "LIST_PAGE_...", "payload": {...} }`.
//! Every fetch-triggering action carries the sequence number of its request
//! so late responses can be recognised.

use pforge_core::favorites::FavoriteSummary;
use pforge_core::ui::UiLayout;
use serde::{Deserialize, Serialize};

use crate::state::Filter;

/// A part of the page state a response can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slice {
    Data,
    Filter,
    Ui,
    FilterFavorites,
}

impl Slice {
    pub const ALL: [Slice; 4] = [Slice::Data, Slice::Filter, Slice::Ui, Slice::FilterFavorites];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "LIST_PAGE_LOAD_BEGIN")]
    LoadBegin { seq: u64, category: String },

    #[serde(rename = "LIST_PAGE_LOAD_SUCCESS", rename_all = "camelCase")]
    LoadSuccess {
        seq: u64,
        filter: Filter,
        ui: UiLayout,
        data: Vec<serde_json::Value>,
        #[serde(default)]
        filter_favorites: Vec<FavoriteSummary>,
    },

    /// Failure of any request; `seq` names which one.
    #[serde(rename = "LIST_PAGE_LOAD_FAILURE")]
    LoadFailure { seq: u64, error: String },

    /// A local edit of one filter key. No request is made.
    #[serde(rename = "LIST_PAGE_FILTER_SET", rename_all = "camelCase")]
    FilterSet {
        id: String,
        new_value: serde_json::Value,
    },

    #[serde(rename = "LIST_PAGE_FILTER_RESET_BEGIN")]
    FilterResetBegin { seq: u64 },

    #[serde(rename = "LIST_PAGE_FILTER_RESET_SUCCESS")]
    FilterResetSuccess { seq: u64, filter: Filter },

    #[serde(rename = "LIST_PAGE_DATA_UPDATE_BEGIN")]
    DataUpdateBegin { seq: u64 },

    #[serde(rename = "LIST_PAGE_DATA_UPDATE_SUCCESS")]
    DataUpdateSuccess {
        seq: u64,
        data: Vec<serde_json::Value>,
    },

    /// A favorite action went out; `slices` are the parts its response may
    /// replace.
    #[serde(rename = "LIST_PAGE_FAVORITE_BEGIN")]
    FavoriteBegin { seq: u64, slices: Vec<Slice> },

    /// Only the keys present in the response are merged.
    #[serde(rename = "LIST_PAGE_FAVORITE_SUCCESS", rename_all = "camelCase")]
    FavoriteSuccess {
        seq: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Vec<serde_json::Value>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ui: Option<UiLayout>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Filter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter_favorites: Option<Vec<FavoriteSummary>>,
    },
}

impl Action {
    /// The wire name of the action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::LoadBegin { .. } => "LIST_PAGE_LOAD_BEGIN",
            Action::LoadSuccess { .. } => "LIST_PAGE_LOAD_SUCCESS",
            Action::LoadFailure { .. } => "LIST_PAGE_LOAD_FAILURE",
            Action::FilterSet { .. } => "LIST_PAGE_FILTER_SET",
            Action::FilterResetBegin { .. } => "LIST_PAGE_FILTER_RESET_BEGIN",
            Action::FilterResetSuccess { .. } => "LIST_PAGE_FILTER_RESET_SUCCESS",
            Action::DataUpdateBegin { .. } => "LIST_PAGE_DATA_UPDATE_BEGIN",
            Action::DataUpdateSuccess { .. } => "LIST_PAGE_DATA_UPDATE_SUCCESS",
            Action::FavoriteBegin { .. } => "LIST_PAGE_FAVORITE_BEGIN",
            Action::FavoriteSuccess { .. } => "LIST_PAGE_FAVORITE_SUCCESS",
        }
    }

    /// Convenience constructor for [`Action::FilterSet`].
    pub fn filter_set(id: impl Into<String>, new_value: impl Into<serde_json::Value>) -> Self {
        Action::FilterSet {
            id: id.into(),
            new_value: new_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn filter_set_reads_redux_shape() {
        let action: Action = serde_json::from_value(json!({
            "type": "LIST_PAGE_FILTER_SET",
            "payload": {"id": "status", "newValue": "OPEN"}
        }))
        .unwrap();
        assert_eq!(action, Action::filter_set("status", "OPEN"));
    }

    #[test]
    fn favorite_success_omits_absent_keys() {
        let action = Action::FavoriteSuccess {
            seq: 3,
            data: None,
            ui: None,
            filter: None,
            filter_favorites: Some(vec![]),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "type": "LIST_PAGE_FAVORITE_SUCCESS",
                "payload": {"seq": 3, "filterFavorites": []}
            })
        );
        assert_eq!(action.kind(), "LIST_PAGE_FAVORITE_SUCCESS");
    }
}
