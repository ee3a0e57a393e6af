//! Embedding Routes - On-demand embedding regeneration
//!
//! Thin adapters: parse trigger parameters, build an `EmbeddingJob` and hand
//! it to the coordinator.

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use stuntpitch::EmbeddingJob;

use crate::error::ApiError;
use crate::models::{
    ErrorResponse, GenerateEmbeddingQuery, GenerateEmbeddingsRequest, GenerateEmbeddingsResponse,
};
use crate::AppState;

/// Generate embeddings for one profile or a batch
#[utoipa::path(
    post,
    path = "/embeddings/generate",
    request_body = GenerateEmbeddingsRequest,
    responses(
        (status = 200, description = "Embeddings generated", body = GenerateEmbeddingsResponse),
        (status = 400, description = "Invalid trigger parameters", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Provider or store failure", body = ErrorResponse)
    ),
    tag = "Embeddings"
)]
pub async fn generate_embeddings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateEmbeddingsResponse>, ApiError> {
    let payload = parse_request(&body)?;

    let profile_id = payload
        .profile_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .map(parse_profile_id)
        .transpose()?;

    let batch_size = payload
        .batch_size
        .unwrap_or(state.coordinator.config().default_batch_size);

    run_job(&state, EmbeddingJob::from_params(profile_id, batch_size)).await
}

/// Generate the embedding for a single profile
///
/// GET /embeddings/generate?profileId=...
#[utoipa::path(
    get,
    path = "/embeddings/generate",
    params(GenerateEmbeddingQuery),
    responses(
        (status = 200, description = "Embedding generated", body = GenerateEmbeddingsResponse),
        (status = 400, description = "Profile ID missing or malformed", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Provider or store failure", body = ErrorResponse)
    ),
    tag = "Embeddings"
)]
pub async fn generate_profile_embedding(
    State(state): State<AppState>,
    Query(query): Query<GenerateEmbeddingQuery>,
) -> Result<Json<GenerateEmbeddingsResponse>, ApiError> {
    let raw = query
        .profile_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Profile ID required"))?;

    let profile_id = parse_profile_id(&raw)?;

    run_job(&state, EmbeddingJob::Single(profile_id)).await
}

async fn run_job(
    state: &AppState,
    job: EmbeddingJob,
) -> Result<Json<GenerateEmbeddingsResponse>, ApiError> {
    let outcome = state.coordinator.run(job).await?;
    Ok(Json(outcome.into()))
}

/// Body is read as JSON whatever the content type; an empty body means defaults
fn parse_request(body: &[u8]) -> Result<GenerateEmbeddingsRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateEmbeddingsRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))
}

fn parse_profile_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::bad_request(format!("Invalid profile ID: {}", raw)))
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/embeddings/generate",
        post(generate_embeddings).get(generate_profile_embedding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use stuntpitch::testing::{InMemoryProfileRepository, StubEmbeddingService};
    use stuntpitch::{EmbeddingConfig, EmbeddingCoordinator, Profile};
    use tower::ServiceExt;

    const DIMS: usize = 8;

    fn profile(bio: &str) -> Profile {
        Profile::new(Uuid::new_v4(), Some(bio.to_string()), vec![], None)
    }

    fn test_app(
        repo: &Arc<InMemoryProfileRepository>,
        embedder: StubEmbeddingService,
        api_key: Option<&str>,
    ) -> Router {
        let config = EmbeddingConfig {
            dimensions: DIMS,
            ..Default::default()
        };
        let coordinator = Arc::new(EmbeddingCoordinator::new(
            repo.clone(),
            Arc::new(embedder),
            config,
        ));
        crate::app(AppState::new(coordinator, api_key.map(String::from)))
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/embeddings/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_empty_body_embeds_all_missing() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![
            profile("High falls"),
            profile("Fire burns"),
            profile("Precision driving"),
        ]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app.oneshot(post_json(json!({}))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("All embeddings generated successfully"));
        assert_eq!(body["summary"]["succeeded"], json!(3));
        assert_eq!(repo.missing_count().await, 0);
    }

    #[tokio::test]
    async fn test_post_batch_reports_partial_failure() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![
            profile("one"),
            profile("FAIL two"),
            profile("three"),
        ]));
        let app = test_app(
            &repo,
            StubEmbeddingService::new(DIMS).failing_on("FAIL"),
            None,
        );

        let response = app
            .oneshot(post_json(json!({ "batchSize": 3 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["summary"]["failed"], json!(1));
        assert_eq!(body["summary"]["failures"].as_array().map(Vec::len), Some(1));
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_post_batch_size_bounds_selection() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(
            (0..4).map(|i| profile(&format!("Performer {}", i))).collect(),
        ));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app
            .oneshot(post_json(json!({ "batchSize": 2 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_post_single_profile() {
        let p = profile("Wire work");
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![p.clone()]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app
            .oneshot(post_json(json!({ "profileId": p.id.to_string() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert!(body.get("summary").is_none());
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_post_single_provider_failure_is_500() {
        let p = profile("FAIL always");
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![p.clone()]));
        let app = test_app(
            &repo,
            StubEmbeddingService::new(DIMS).failing_on("FAIL"),
            None,
        );

        let response = app
            .oneshot(post_json(json!({ "profileId": p.id.to_string() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("rate limit"));
    }

    #[tokio::test]
    async fn test_post_zero_batch_is_400() {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app
            .oneshot(post_json(json!({ "batchSize": 0 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn post_raw(body: &'static str, content_type: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/embeddings/generate");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_post_without_content_type_is_accepted() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![
            profile("High falls"),
            profile("Fire burns"),
        ]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app
            .oneshot(post_raw(r#"{"batchSize":1}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_post_without_body_uses_defaults() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![profile("x")]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app.oneshot(post_raw("", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_post_malformed_body_is_json_400() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![profile("x")]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        for raw in [r#"{"batchSize":"#, r#"{"batchSize":-1}"#, r#"{"batchSize":"5"}"#] {
            let response = app
                .clone()
                .oneshot(post_raw(raw, Some("application/json")))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", raw);
            let body = body_json(response).await;
            assert!(body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body"));
        }
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_get_without_profile_id_is_400() {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app.oneshot(get("/embeddings/generate")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Profile ID required" }));
    }

    #[tokio::test]
    async fn test_get_malformed_profile_id_is_400() {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app
            .oneshot(get("/embeddings/generate?profileId=not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_profile_is_404() {
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![profile("x")]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);

        let response = app
            .oneshot(get(&format!(
                "/embeddings/generate?profileId={}",
                Uuid::new_v4()
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("not found"));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_get_regenerates_existing_embedding() {
        let p = profile("Stair falls");
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![p.clone()]));
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), None);
        let uri = format!("/embeddings/generate?profileId={}", p.id);

        let first = app.clone().oneshot(get(&uri)).await.unwrap();
        let second = app.oneshot(get(&uri)).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_api_key_required_when_configured() {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let app = test_app(&repo, StubEmbeddingService::new(DIMS), Some("secret"));

        let unauthorized = app
            .clone()
            .oneshot(post_json(json!({})))
            .await
            .unwrap();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let mut request = post_json(json!({}));
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        let authorized = app.clone().oneshot(request).await.unwrap();
        assert_eq!(authorized.status(), StatusCode::OK);

        let health = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
    }
}
