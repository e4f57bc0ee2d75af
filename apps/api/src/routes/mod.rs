pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Settings
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_update_settings),
        )
        // Generation
        .route("/api/v1/content-types", get(generation::handle_content_types))
        .route("/api/v1/generate", post(generation::handle_generate))
        .route("/api/v1/progress", get(generation::handle_progress))
        // History
        .route(
            "/api/v1/history",
            get(history::handle_list_history).delete(history::handle_clear_history),
        )
        .route("/api/v1/history/grouped", get(history::handle_grouped_history))
        .route("/api/v1/history/:id/text", get(history::handle_artifact_text))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::generation::progress::ProgressTracker;
    use crate::generation::runner::tests::FakeGenerator;
    use crate::generation::runner::BatchRunner;
    use crate::history::store::{SlotStore, HISTORY_SLOT};
    use crate::history::History;
    use crate::settings::SettingsService;

    async fn test_state(dir: &std::path::Path, generator: Arc<FakeGenerator>, key: Option<&str>) -> AppState {
        let store = SlotStore::open(dir).unwrap();
        let history = History::load(store.clone(), None).unwrap();
        let settings = SettingsService::load(store, key).await.unwrap();
        let runner = BatchRunner::new(
            generator,
            ProgressTracker::new(Duration::from_millis(500)),
            history.clone(),
        );
        AppState {
            config: Config::default(),
            settings,
            history,
            runner,
        }
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), Arc::new(FakeGenerator::default()), None).await);
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gemini-pro");
    }

    #[tokio::test]
    async fn test_generate_without_key_returns_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let app = build_router(test_state(dir.path(), generator.clone(), None).await);

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/generate",
            Some(json!({"keywords": "pho", "content_types": ["recipe"]})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_API_KEY");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_then_group_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), Arc::new(FakeGenerator::default()), Some("key")).await;
        let app = build_router(state);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/generate",
            Some(json!({
                "keywords": "pho\nramen",
                "content_types": ["seo", "recipe"],
                "language": "German"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generated"].as_array().unwrap().len(), 4);
        assert_eq!(body["history_len"], 4);
        assert_eq!(body["progress"]["pho-seo"], 100);

        let (_, grouped) = send(app.clone(), "GET", "/api/v1/history/grouped", None).await;
        let groups = grouped.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["keyword"], "ramen");
        assert_eq!(groups[0]["items"].as_array().unwrap().len(), 2);

        let id = body["generated"][0]["id"].as_str().unwrap().to_string();
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/history/{id}/text"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let text = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(text.to_vec()).unwrap().starts_with("generated #1"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_generic_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(
            dir.path(),
            Arc::new(FakeGenerator::failing_on(1)),
            Some("key"),
        ).await);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/generate",
            Some(json!({"keywords": "pho", "content_types": ["image"]})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"]["message"],
            crate::errors::GENERATION_FAILED_MESSAGE
        );

        let (_, progress) = send(app, "GET", "/api/v1/progress", None).await;
        assert_eq!(progress["pho-image"], -1);
    }

    #[tokio::test]
    async fn test_clear_history_empties_list_and_slot() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(
            dir.path(),
            Arc::new(FakeGenerator::default()),
            Some("key"),
        ).await);

        send(
            app.clone(),
            "POST",
            "/api/v1/generate",
            Some(json!({"keywords": "pho", "content_types": ["article"]})),
        )
        .await;
        assert!(dir.path().join(HISTORY_SLOT).exists());

        let (status, _) = send(app.clone(), "DELETE", "/api/v1/history", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, list) = send(app, "GET", "/api/v1/history", None).await;
        assert!(list.as_array().unwrap().is_empty());
        assert!(!dir.path().join(HISTORY_SLOT).exists());
    }

    #[tokio::test]
    async fn test_settings_round_trip_masks_key() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), Arc::new(FakeGenerator::default()), None).await);

        let (status, body) = send(
            app.clone(),
            "PUT",
            "/api/v1/settings",
            Some(json!({"api_key": "AIza-secret-abcd", "language": "Italian"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_api_key"], true);
        assert_eq!(body["api_key_hint"], "****abcd");

        let (_, body) = send(app, "GET", "/api/v1/settings", None).await;
        assert_eq!(body["language"], "Italian");
        assert!(body.get("api_key").is_none());
    }

    #[tokio::test]
    async fn test_unknown_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), Arc::new(FakeGenerator::default()), None).await);
        let uri = format!("/api/v1/history/{}/text", uuid::Uuid::new_v4());
        let (status, body) = send(app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_content_types_listed_with_labels() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), Arc::new(FakeGenerator::default()), None).await);
        let (_, body) = send(app, "GET", "/api/v1/content-types", None).await;
        let types = body.as_array().unwrap();
        assert_eq!(types.len(), 5);
        assert_eq!(types[0]["type"], "recipe");
        assert_eq!(types[0]["label"], "Facebook Recipe Post");
    }
}
