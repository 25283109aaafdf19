pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::text::fixtures::pdf_with_pages;
    use crate::analysis::AnalyzerConfig;
    use crate::config::Config;

    const BOUNDARY: &str = "sphere-ats-test-boundary";

    fn test_state() -> AppState {
        AppState::new(Config {
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: 1024 * 1024,
            analyzer: AnalyzerConfig::default(),
        })
    }

    fn multipart_body(resume: Option<&[u8]>, job_description: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(jd) = job_description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{jd}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(pdf) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(pdf);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_analyze(body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn sample_resume() -> Vec<u8> {
        pdf_with_pages(&[&[
            "Jane Roe",
            "jane.roe@example.com",
            "Skills: Rust",
        ]])
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "sphere-ats");
    }

    #[tokio::test]
    async fn test_analyze_scores_against_job_description() {
        let pdf = sample_resume();
        let (status, body) = post_analyze(multipart_body(Some(&pdf), Some("Rust engineer"))).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["contact"]["email"], "jane.roe@example.com");
        assert_eq!(body["job_match"]["status"], "scored");
        assert!(body["job_match"]["keyword_matches"].as_u64().unwrap() >= 1);
        assert!(body["job_match"]["match_percentage"].as_f64().unwrap() > 35.0);
    }

    #[tokio::test]
    async fn test_analyze_without_job_description_warns() {
        let pdf = sample_resume();
        let (status, body) = post_analyze(multipart_body(Some(&pdf), None)).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["job_match"]["status"], "missing_job_description");
        assert!(body["job_match"].get("match_percentage").is_none());
        assert_eq!(body["contact"]["email"], "jane.roe@example.com");
    }

    #[tokio::test]
    async fn test_analyze_rejects_unparsable_upload() {
        let (status, body) =
            post_analyze(multipart_body(Some(b"not a pdf at all"), Some("Rust engineer"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "DOCUMENT_PARSE_ERROR");
        assert!(body.get("contact").is_none());
        assert!(body.get("job_match").is_none());
    }

    #[tokio::test]
    async fn test_analyze_requires_resume_field() {
        let (status, body) = post_analyze(multipart_body(None, Some("Rust engineer"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
