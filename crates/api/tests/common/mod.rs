#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use pforge_core::mapping::EntityBase;
use pforge_core::types::DbId;
use pforge_db::memory::MemoryStore;
use pforge_db::models::timesheet::{TaskEntity, TimesheetEntity};
use tower::ServiceExt;

use pforge_api::auth::jwt::{generate_access_token, JwtConfig};
use pforge_api::config::ServerConfig;
use pforge_api::router::build_app_router;
use pforge_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-for-list-pages".to_string(),
            access_token_expiry_mins: 5,
        },
    }
}

/// Build the production router over the given in-memory store.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_router(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

/// A valid bearer token for `user_id`.
pub fn token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

pub async fn get(app: Router, uri: &str, user_id: Option<DbId>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("authorization", format!("Bearer {}", token(user_id)));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: DbId,
    body: &serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token(user_id)))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A timesheet of `user_id` on `2024-03-<day>` from 09:00 to 10:30.
pub fn timesheet(user_id: DbId, day: u32, description: &str) -> TimesheetEntity {
    TimesheetEntity {
        base: EntityBase::default(),
        user_id: Some(user_id),
        task: Some(TaskEntity {
            base: EntityBase {
                id: Some(900),
                ..Default::default()
            },
            title: Some("Development".into()),
        }),
        start_time: Some(Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()),
        stop_time: Some(Utc.with_ymd_and_hms(2024, 3, day, 10, 30, 0).unwrap()),
        location: Some("Office".into()),
        description: Some(description.into()),
        reference: None,
    }
}
