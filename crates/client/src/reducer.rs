//! The pure state transition of a list page.
//!
//! Requests may complete out of order. A response only replaces a slice
//! if it belongs to the latest request issued for that slice, and only the
//! latest request overall decides `status` and `error`.

use crate::action::{Action, Slice};
use crate::state::{ListPageState, SortDirection, Sorting, Status};

/// Apply `action` to `state`.
pub fn reduce(mut state: ListPageState, action: Action) -> ListPageState {
    match action {
        Action::LoadBegin { seq, category } => {
            let mut fresh = ListPageState {
                category,
                ..Default::default()
            };
            begin(&mut fresh, seq, &Slice::ALL);
            fresh
        }
        Action::LoadSuccess {
            seq,
            filter,
            ui,
            data,
            filter_favorites,
        } => {
            if state.owns(Slice::Ui, seq) {
                state.sorting = ui.default_sort_column().map(|column| Sorting {
                    column: column.to_string(),
                    direction: SortDirection::Asc,
                });
                state.ui = Some(ui);
            }
            if state.owns(Slice::Filter, seq) {
                state.filter = filter;
            }
            if state.owns(Slice::Data, seq) {
                state.data = data;
            }
            if state.owns(Slice::FilterFavorites, seq) {
                state.filter_favorites = filter_favorites;
            }
            finish(&mut state, seq, None);
            state
        }
        Action::LoadFailure { seq, error } => {
            finish(&mut state, seq, Some(error));
            state
        }
        Action::FilterSet { id, new_value } => {
            state.filter.insert(id, new_value);
            state
        }
        Action::FilterResetBegin { seq } => {
            begin(&mut state, seq, &[Slice::Filter]);
            state
        }
        Action::FilterResetSuccess { seq, filter } => {
            if state.owns(Slice::Filter, seq) {
                state.filter = filter;
            }
            finish(&mut state, seq, None);
            state
        }
        Action::DataUpdateBegin { seq } => {
            begin(&mut state, seq, &[Slice::Data]);
            state
        }
        Action::DataUpdateSuccess { seq, data } => {
            if state.owns(Slice::Data, seq) {
                state.data = data;
            }
            finish(&mut state, seq, None);
            state
        }
        Action::FavoriteBegin { seq, slices } => {
            begin(&mut state, seq, &slices);
            state
        }
        Action::FavoriteSuccess {
            seq,
            data,
            ui,
            filter,
            filter_favorites,
        } => {
            if let Some(data) = data.filter(|_| state.owns(Slice::Data, seq)) {
                state.data = data;
            }
            if let Some(ui) = ui.filter(|_| state.owns(Slice::Ui, seq)) {
                state.ui = Some(ui);
            }
            if let Some(filter) = filter.filter(|_| state.owns(Slice::Filter, seq)) {
                state.filter = filter;
            }
            if let Some(favorites) =
                filter_favorites.filter(|_| state.owns(Slice::FilterFavorites, seq))
            {
                state.filter_favorites = favorites;
            }
            finish(&mut state, seq, None);
            state
        }
    }
}

fn begin(state: &mut ListPageState, seq: u64, slices: &[Slice]) {
    for slice in slices {
        let latest = state.slice_seq.entry(*slice).or_insert(seq);
        *latest = (*latest).max(seq);
    }
    if seq >= state.latest_seq {
        state.latest_seq = seq;
        state.status = Status::Loading;
        state.error = None;
    }
}

fn finish(state: &mut ListPageState, seq: u64, error: Option<String>) {
    if seq != state.latest_seq {
        tracing::debug!(seq, latest = state.latest_seq, "Ignoring status of superseded request");
        return;
    }
    match error {
        Some(error) => {
            state.status = Status::Error;
            state.error = Some(error);
        }
        None => state.status = Status::Ready,
    }
}

#[cfg(test)]
mod tests {
    use pforge_core::favorites::FavoriteSummary;
    use pforge_core::ui::{UiLayout, UiTable};
    use serde_json::json;

    use super::*;
    use crate::state::Filter;

    fn filter(value: serde_json::Value) -> Filter {
        value.as_object().cloned().unwrap()
    }

    fn ui() -> UiLayout {
        UiLayout::new("Orders").add_table(
            UiTable::result_set()
                .add_column("number", "Number", None)
                .add_column("title", "Title", None),
        )
    }

    fn loaded() -> ListPageState {
        let state = reduce(
            ListPageState::default(),
            Action::LoadBegin {
                seq: 1,
                category: "order".into(),
            },
        );
        reduce(
            state,
            Action::LoadSuccess {
                seq: 1,
                filter: filter(json!({"category": "order", "searchString": "acme"})),
                ui: ui(),
                data: vec![json!({"id": 1})],
                filter_favorites: vec![],
            },
        )
    }

    #[test]
    fn load_moves_through_loading_to_ready() {
        let state = reduce(
            ListPageState::default(),
            Action::LoadBegin {
                seq: 1,
                category: "order".into(),
            },
        );
        assert_eq!(state.status, Status::Loading);
        assert_eq!(state.category, "order");

        let state = loaded();
        assert_eq!(state.status, Status::Ready);
        assert_eq!(state.data.len(), 1);
        assert_eq!(
            state.sorting,
            Some(Sorting {
                column: "number".into(),
                direction: SortDirection::Asc,
            })
        );
    }

    #[test]
    fn filter_set_touches_only_its_key() {
        let state = reduce(loaded(), Action::filter_set("status", "OPEN"));
        assert_eq!(
            state.filter,
            filter(json!({"category": "order", "searchString": "acme", "status": "OPEN"}))
        );
        assert_eq!(state.status, Status::Ready);
    }

    #[test]
    fn failure_keeps_previous_data_and_records_error() {
        let state = reduce(loaded(), Action::DataUpdateBegin { seq: 2 });
        let state = reduce(
            state,
            Action::LoadFailure {
                seq: 2,
                error: "HTTP 500: boom".into(),
            },
        );
        assert_eq!(state.status, Status::Error);
        assert_eq!(state.error.as_deref(), Some("HTTP 500: boom"));
        assert_eq!(state.data, vec![json!({"id": 1})]);

        let state = reduce(state, Action::DataUpdateBegin { seq: 3 });
        assert_eq!(state.status, Status::Loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn late_response_of_superseded_request_is_dropped() {
        let state = reduce(loaded(), Action::DataUpdateBegin { seq: 2 });
        let state = reduce(state, Action::DataUpdateBegin { seq: 3 });

        let state = reduce(
            state,
            Action::DataUpdateSuccess {
                seq: 3,
                data: vec![json!({"id": "new"})],
            },
        );
        assert_eq!(state.status, Status::Ready);

        let state = reduce(
            state,
            Action::DataUpdateSuccess {
                seq: 2,
                data: vec![json!({"id": "old"})],
            },
        );
        assert_eq!(state.data, vec![json!({"id": "new"})]);
        assert_eq!(state.status, Status::Ready);
    }

    #[test]
    fn stale_failure_does_not_flip_status() {
        let state = reduce(loaded(), Action::DataUpdateBegin { seq: 2 });
        let state = reduce(state, Action::FilterResetBegin { seq: 3 });
        let state = reduce(
            state,
            Action::LoadFailure {
                seq: 2,
                error: "timeout".into(),
            },
        );
        assert_eq!(state.status, Status::Loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn requests_on_different_slices_both_merge() {
        let state = reduce(loaded(), Action::DataUpdateBegin { seq: 2 });
        let state = reduce(state, Action::FilterResetBegin { seq: 3 });
        let state = reduce(
            state,
            Action::FilterResetSuccess {
                seq: 3,
                filter: filter(json!({"category": "order"})),
            },
        );
        let state = reduce(
            state,
            Action::DataUpdateSuccess {
                seq: 2,
                data: vec![],
            },
        );
        assert_eq!(state.filter, filter(json!({"category": "order"})));
        assert!(state.data.is_empty());
        assert_eq!(state.status, Status::Ready);
    }

    #[test]
    fn favorite_response_merges_present_keys_only() {
        let state = reduce(
            loaded(),
            Action::FavoriteBegin {
                seq: 2,
                slices: vec![Slice::FilterFavorites],
            },
        );
        let favorites = vec![FavoriteSummary {
            id: 7,
            name: "Q1".into(),
        }];
        let state = reduce(
            state,
            Action::FavoriteSuccess {
                seq: 2,
                data: None,
                ui: None,
                filter: None,
                filter_favorites: Some(favorites.clone()),
            },
        );
        assert_eq!(state.filter_favorites, favorites);
        assert_eq!(state.data, vec![json!({"id": 1})]);
        assert_eq!(state.filter["searchString"], "acme");
    }
}
