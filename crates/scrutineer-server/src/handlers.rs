//! Request handlers and wire envelopes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use scrutineer_core::{ValidationCandidate, ValidationSummary};
use serde::Serialize;

use crate::error::ServerError;
use crate::AppState;

/// Body of `GET /health` responses.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "healthy".to_string(),
    })
}

/// Validate a batch of candidates and report the summary.
///
/// A summary containing failed validations is still a 200; the verdict is
/// in the body. Only a malformed payload (400) and a run that missed its
/// deadline (500) produce error responses.
pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ValidationCandidate>>, JsonRejection>,
) -> Result<Json<ValidationSummary>, ServerError> {
    let Json(candidates) = payload?;
    tracing::debug!(candidates = candidates.len(), "received validation request");

    let summary = state.orchestrator().validate_all(&candidates).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use crate::{app, AppState};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use scrutineer_core::{
        Orchestrator, OrchestratorConfig, ValidationCandidate, ValidationResult, Validator,
        ValidatorRegistry,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState::new(Orchestrator::with_defaults()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_validate(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/validate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn apollo_batch() -> Value {
        json!([{
            "type": "xyz",
            "id": "mission-1",
            "data": {
                "mission": "Apollo 11",
                "crew": ["Neil", "Buzz", "Mike"],
                "rocket": "Saturn V",
            },
        }])
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let (status, body) = get(test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "healthy"}));
    }

    #[tokio::test]
    async fn test_validate_returns_the_summary() {
        let (status, body) = post_validate(test_app(), apollo_batch().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Success");
        assert_eq!(body["successes"][0]["candidateId"], "mission-1");
        assert_eq!(body["successes"][0]["validatorSource"], "example");
        assert_eq!(body["successes"][0]["result"], "Success");
        // Successful results carry no error key on the wire.
        assert!(body["successes"][0].get("error").is_none());
    }

    #[tokio::test]
    async fn test_failed_validations_still_respond_200() {
        let batch = json!([{
            "type": "xyz",
            "id": "mission-2",
            "data": { "mission": 11 },
        }]);
        let (status, body) = post_validate(test_app(), batch.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Failure");
        assert_eq!(body["failures"][0]["candidateId"], "mission-2");
        assert!(body["failures"][0]["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_batch_is_an_empty_success() {
        let (status, body) = post_validate(test_app(), "[]".to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"result": "Success", "successes": [], "failures": []})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_400() {
        let (status, body) = post_validate(test_app(), "{not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "unable to interpret payload"}));
    }

    #[tokio::test]
    async fn test_non_batch_payload_is_a_400() {
        // A lone candidate object is not a batch.
        let candidate = json!({"type": "xyz", "id": "1", "data": {}});
        let (status, body) = post_validate(test_app(), candidate.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "unable to interpret payload"}));
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_a_400() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/validate")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from(apollo_batch().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Validator that never reports within any plausible deadline.
    struct StallValidator;

    #[async_trait]
    impl Validator for StallValidator {
        fn applies(&self, candidate: &ValidationCandidate) -> bool {
            candidate.kind == "xyz"
        }

        async fn validate(&self, candidate: &ValidationCandidate) -> ValidationResult {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            ValidationResult::success("stall", &candidate.id)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_run_is_a_500() {
        let mut registry = ValidatorRegistry::new();
        registry.register(Arc::new(StallValidator));
        let orchestrator = Orchestrator::new(registry, OrchestratorConfig::default());
        let app = app(AppState::new(orchestrator));

        let batch = json!([{"type": "xyz", "id": "1", "data": {}}]);
        let (status, body) = post_validate(app, batch.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("validation exceeded timeout"), "{error}");
    }
}
