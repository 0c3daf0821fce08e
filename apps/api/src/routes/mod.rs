pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::guidance::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form choices and catalog lookups
        .route("/api/v1/options", get(handlers::handle_options))
        .route("/api/v1/colleges", get(handlers::handle_colleges))
        // Workflows, one per help type
        .route("/api/v1/suggestions", post(handlers::handle_suggestions))
        .route("/api/v1/compare", post(handlers::handle_compare))
        .route("/api/v1/admission", post(handlers::handle_admission))
        .route("/api/v1/career", post(handlers::handle_career))
        .route("/api/v1/interact", post(handlers::handle_interact))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::catalog::tests::sample_catalog;
    use crate::guidance::workflows::GuidanceSettings;
    use crate::llm_client::tests::StubGuidance;

    fn app(stub: Arc<StubGuidance>) -> Router {
        build_router(AppState {
            catalog: Arc::new(sample_catalog()),
            guidance: stub,
            settings: GuidanceSettings {
                timeout: Duration::from_secs(5),
                concurrent: true,
            },
        })
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_reports_catalog_and_model() {
        let (status, body) = send(app(Arc::default()), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["catalog_records"], 2);
        assert_eq!(body["model"], "stub-model");
    }

    #[tokio::test]
    async fn test_options_and_colleges() {
        let (_, body) = send(app(Arc::default()), "GET", "/api/v1/options", None).await;
        assert_eq!(body["professions"][2], "Arts & Science");
        assert_eq!(body["help_types"][3], "career_guidance");

        let (_, body) = send(app(Arc::default()), "GET", "/api/v1/colleges", None).await;
        assert_eq!(body["colleges"], json!(["A", "B"]));
    }

    #[tokio::test]
    async fn test_suggestions_endpoint() {
        let stub = Arc::new(StubGuidance::answering("Go for B."));
        let (status, body) = send(
            app(stub.clone()),
            "POST",
            "/api/v1/suggestions",
            Some(json!({"profession": "Engineering", "preferred_course": "", "location": "Chennai"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"][0]["college"], "B");
        assert_eq!(body["matches"][1]["college"], "A");
        assert_eq!(body["guidance"]["content"], "Go for B.");
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_suggestions_are_ok_with_warning() {
        let stub = Arc::new(StubGuidance::answering("unused"));
        let (status, body) = send(
            app(stub.clone()),
            "POST",
            "/api/v1/suggestions",
            Some(json!({"profession": "Medical"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"], json!([]));
        assert!(body["warning"].as_str().unwrap().contains("No exact matches"));
        assert!(body.get("guidance").is_none());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compare_unknown_college_is_404() {
        let (status, body) = send(
            app(Arc::default()),
            "POST",
            "/api/v1/compare",
            Some(json!({"college_a": "A", "college_b": "Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_profession_uses_error_envelope() {
        let stub = Arc::new(StubGuidance::default());
        let (status, body) = send(
            app(stub.clone()),
            "POST",
            "/api/v1/suggestions",
            Some(json!({"profession": "Law"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("Law"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compare_missing_field_uses_error_envelope() {
        let (status, body) = send(
            app(Arc::default()),
            "POST",
            "/api/v1/compare",
            Some(json!({"college_a": "A"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("college_b"));
    }

    #[tokio::test]
    async fn test_non_json_body_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/career")
            .body(Body::from("course=BBA"))
            .unwrap();
        let response = app(Arc::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_admission_blank_input_is_400() {
        let stub = Arc::new(StubGuidance::default());
        let (status, body) = send(
            app(stub.clone()),
            "POST",
            "/api/v1/admission",
            Some(json!({"target_college": "Hindu College", "target_course": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_career_endpoint_returns_four_sections() {
        let (status, body) = send(
            app(Arc::default()),
            "POST",
            "/api/v1/career",
            Some(json!({"course": "BBA"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec!["Career Options", "Higher Studies", "Skills to Build", "Motivation"]
        );
    }

    #[tokio::test]
    async fn test_interact_dispatches_on_help_type() {
        let (status, body) = send(
            app(Arc::default()),
            "POST",
            "/api/v1/interact",
            Some(json!({
                "profile": {"profession": "Engineering", "help_type": "comparison"},
                "college_a": "A",
                "college_b": "B"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["help_type"], "comparison");
        assert_eq!(body["second"]["college"], "B");
    }
}
