//! The calendar page's pre-migration preference is converted on first use.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get};
use pforge_core::legacy::LEGACY_CALENDAR_KEY;
use pforge_db::memory::MemoryStore;
use pforge_db::store::PreferenceStore;
use serde_json::json;

#[tokio::test]
async fn legacy_filter_is_migrated_on_first_initial_list_only() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_preference(
            1,
            LEGACY_CALENDAR_KEY,
            &json!({
                "viewType": "AGENDA_WEEK",
                "startDate": "2024-03-06",
                "firstHour": 7,
                "showBreaks": true
            }),
        )
        .await
        .unwrap();
    let app = common::build_test_app(store.clone());

    let response = get(app.clone(), "/api/v1/calendar/initial-list", Some(1)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["filter"]["viewType"], "week");
    assert_eq!(first["filter"]["start"], "2024-03-06");
    assert_eq!(first["filter"]["firstHour"], 7);

    assert_eq!(store.get_preference(1, LEGACY_CALENDAR_KEY).await.unwrap(), None);
    let migrated = store
        .get_preference(1, "calendar.displaySettings")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(migrated, first["filter"]);

    // A stale legacy value reappearing must not be read again.
    store
        .put_preference(1, LEGACY_CALENDAR_KEY, &json!({"viewType": "BASIC_DAY"}))
        .await
        .unwrap();
    let response = get(app, "/api/v1/calendar/initial-list", Some(1)).await;
    let second = body_json(response).await;
    assert_eq!(second["filter"], first["filter"]);
}

#[tokio::test]
async fn migration_is_per_user() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_preference(1, LEGACY_CALENDAR_KEY, &json!({"viewType": "BASIC_DAY"}))
        .await
        .unwrap();
    let app = common::build_test_app(store.clone());

    let response = get(app, "/api/v1/calendar/initial-list", Some(2)).await;
    assert_eq!(body_json(response).await["filter"]["viewType"], "month");
    assert!(store
        .get_preference(1, LEGACY_CALENDAR_KEY)
        .await
        .unwrap()
        .is_some());
}
