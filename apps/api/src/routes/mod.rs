pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        .route("/api/v1/screenings", post(handlers::handle_screen))
        .route("/api/v1/screenings/export", post(handlers::handle_export))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::screening::extractor::fixtures;

    const BOUNDARY: &str = "screener-test-boundary-7f3a";
    const DOCX_MIME: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, Vec<u8>),
    }

    fn test_state() -> AppState {
        AppState::new(Config {
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: 1024 * 1024,
            screening_concurrency: 2,
            flag_empty_extractions: false,
        })
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
                Part::File(file_name, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post_multipart(uri: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn sample_parts() -> Vec<Part<'static>> {
        vec![
            Part::File(
                "jane.docx",
                DOCX_MIME,
                fixtures::docx(&["Jane Doe jane@example.com 555-123-4567", "Rust and Docker"]),
            ),
            Part::File("notes.txt", "text/plain", b"Rust".to_vec()),
            Part::Text("skills", "Rust"),
            Part::Text("skills", "Go"),
            Part::Text("keywords", "docker, "),
            Part::Text("job_description", "Senior Rust developer"),
        ]
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "screener-api");
    }

    #[tokio::test]
    async fn test_catalog() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/api/v1/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["education"][1], "Master's");
        assert_eq!(body["skills"][0], "AI");
    }

    #[tokio::test]
    async fn test_screening_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_multipart("/api/v1/screenings", &sample_parts()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body["checklist_keywords"],
            serde_json::json!(["rust", "go", "docker"])
        );
        assert_eq!(
            body["job_description_keywords"],
            serde_json::json!(["senior", "rust", "developer"])
        );

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);

        let jane = &results[0];
        assert_eq!(jane["file_name"], "jane.docx");
        assert_eq!(jane["email"], "jane@example.com");
        assert_eq!(jane["checklist_matched"], serde_json::json!(["rust", "docker"]));
        assert_eq!(jane["checklist_score"], "67%");
        assert_eq!(jane["jd_score"], "33%");
        assert!(jane["error"].is_null());

        let notes = &results[1];
        assert_eq!(notes["error"], "unsupported_format");
        assert_eq!(notes["checklist_score"], "");
    }

    #[tokio::test]
    async fn test_screening_requires_files() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_multipart(
                "/api/v1/screenings",
                &[Part::Text("keywords", "rust")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_csv_export() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_multipart("/api/v1/screenings/export", &sample_parts()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"screening_results.csv\""
        );

        let csv = String::from_utf8(body_bytes(response).await).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("File,Email,Phone,Matched"));
        assert!(lines[1].starts_with("\"jane.docx\",\"jane@example.com\""));
        assert!(lines[2].ends_with("\"unsupported_format\""));
    }

    #[tokio::test]
    async fn test_bundle_export() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_multipart(
                "/api/v1/screenings/export?format=bundle&layout=full_text",
                &sample_parts(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");

        let bytes = body_bytes(response).await;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut dump = String::new();
        archive
            .by_name("resume_1.txt")
            .unwrap()
            .read_to_string(&mut dump)
            .unwrap();
        assert!(dump.starts_with("Jane Doe"));

        let mut csv = String::new();
        archive
            .by_name("screening_results.csv")
            .unwrap()
            .read_to_string(&mut csv)
            .unwrap();
        assert!(csv.starts_with("File,Email,Phone,Matched,Missing,Score,Text,Error"));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut state = test_state();
        state.config.max_upload_bytes = 64;
        let app = build_router(state);
        let response = app
            .oneshot(post_multipart(
                "/api/v1/screenings",
                &[Part::File("big.pdf", "application/pdf", vec![b'x'; 4096])],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
