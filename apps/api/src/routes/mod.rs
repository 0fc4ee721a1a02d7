pub mod health;
pub mod statistics;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::rankings::handlers as rankings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates
        .route(
            "/api/v1/candidates",
            post(candidates::handle_create_candidate).get(candidates::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/search",
            post(candidates::handle_search_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate).delete(candidates::handle_archive_candidate),
        )
        // Jobs
        .route("/api/v1/jobs", post(jobs::handle_create_job))
        .route("/api/v1/jobs/:job_id", get(jobs::handle_get_job))
        .route(
            "/api/v1/jobs/:job_id/rankings",
            get(jobs::handle_job_rankings),
        )
        // Rankings
        .route("/api/v1/rankings", post(rankings::handle_rank_candidates))
        .route("/api/v1/statistics", get(statistics::statistics_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::embeddings::DisabledEmbedder;
    use ats_api::ranking::RankingEngine;

    /// State whose pool never connects: only routes that fail before any I/O may be exercised.
    fn test_state() -> AppState {
        let config = Config::for_tests();
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            llm: None,
            embedder: Arc::new(DisabledEmbedder),
            engine: Arc::new(RankingEngine::new(config.ranking).unwrap()),
            config,
        }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_code(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        json["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["service"], "ats-api");
        assert_eq!(json["llm_extraction"], false);
        assert!(json["embedding_model"].is_null());
    }

    #[tokio::test]
    async fn test_ranking_requires_job_reference() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/api/v1/rankings", r#"{"top_k": 10}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ranking_rejects_zero_top_k() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/rankings",
                r#"{"job_description": "Python developer", "top_k": 0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ranking_rejects_invalid_weights() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/rankings",
                r#"{"job_description": "Python developer",
                    "weights": {"skills": 0.5, "experience": 0.5, "domain": 0.5, "education": 0.5}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "RANKING_ERROR");
    }

    #[tokio::test]
    async fn test_create_candidate_rejects_blank_resume() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/api/v1/candidates", r#"{"resume_text": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_job_rejects_blank_description() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/api/v1/jobs", r#"{"job_description": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_candidates_rejects_zero_limit() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/candidates?limit=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_rejects_zero_limit() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/candidates/search",
                r#"{"query": "python", "limit": 0, "use_boolean_search": false}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
