//! Submission Gateway HTTP tests, run against a mock Store Service.

mod helpers;

use axum::http::{header, HeaderValue, Method, StatusCode};
use helpers::{
    document, files_in, gateway_server, jane_doe_form, MockStore, EXPIRED_TOKEN, LIVE_TOKEN,
};
use serde_json::{json, Value};
use tempfile::TempDir;

const ACCEPTED: &str = "ใบสมัครของคุณได้รับเรียบร้อยแล้ว";
const FAILED: &str = "เกิดข้อผิดพลาดในการส่งใบสมัคร";
const PROCESSING_PREFIX: &str = "เกิดข้อผิดพลาดในการประมวลผล: ";
const MAX_BODY: usize = 1024 * 1024;

#[tokio::test]
async fn submission_is_forwarded_as_pending_record() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let response = server
        .post("/api/submit-application")
        .multipart(jane_doe_form())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "message": ACCEPTED }));

    let received = store.received();
    assert_eq!(received.len(), 1);
    let record = &received[0];
    assert_eq!(record["fullName"], "Jane Doe");
    assert_eq!(record["email"], "jane@example.com");
    assert_eq!(record["age"], json!(16));
    assert_eq!(record["gradeLevel"], "10");
    assert_eq!(record["program"], "science");
    assert_eq!(record["status"], "pending");
    assert!(record["submittedAt"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(record["birthCertificate"].is_null());
    assert!(record["transcript"].is_null());
}

#[tokio::test]
async fn other_methods_are_rejected_before_reading_the_body() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let response = server.get("/api/submit-application").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Method not allowed" })
    );

    let response = server
        .method(Method::PUT, "/api/submit-application")
        .multipart(jane_doe_form())
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    assert!(store.received().is_empty());
}

#[tokio::test]
async fn downstream_message_is_relayed() {
    let store = MockStore::spawn(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "db error" }).to_string(),
    )
    .await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let response = server
        .post("/api/submit-application")
        .multipart(jane_doe_form())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "message": "db error" }));
}

#[tokio::test]
async fn rejection_without_message_uses_generic_text_and_removes_uploads() {
    let store = MockStore::spawn(StatusCode::BAD_REQUEST, "Bad Request").await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let form = jane_doe_form()
        .add_part("transcript", document("grades.pdf", "application/pdf", b"%PDF-1.4 grades"));
    let response = server
        .post("/api/submit-application")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "message": FAILED }));
    assert_eq!(store.received().len(), 1);
    assert!(files_in(uploads.path()).is_empty());
}

#[tokio::test]
async fn uploaded_documents_are_stored_and_served() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let mut certificate = vec![0x25, 0x50, 0x44, 0x46, 0xff, 0xfe, 0x00, 0x0d, 0x0a];
    certificate.extend_from_slice(b"--not-a-boundary\r\n");
    certificate.extend_from_slice(&[0x80, 0x81, 0x82]);

    let form = jane_doe_form()
        .add_part("birthCertificate", document("cert.pdf", "application/pdf", &certificate))
        .add_part("transcript", document("../../etc/passwd", "text/plain", b"grades"))
        .add_part("photo", document("me.jpg", "image/jpeg", b"jpeg"));
    let response = server
        .post("/api/submit-application")
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let record = &store.received()[0];
    let certificate_url = record["birthCertificate"].as_str().unwrap().to_string();
    let transcript_url = record["transcript"].as_str().unwrap().to_string();
    assert!(certificate_url.starts_with("/uploads/"));
    assert!(certificate_url.ends_with("_cert.pdf"));
    assert!(transcript_url.starts_with("/uploads/"));
    assert!(!transcript_url["/uploads/".len()..].contains('/'));
    assert!(!transcript_url.contains(".."));

    // Only the two document fields are kept.
    assert_eq!(files_in(uploads.path()).len(), 2);

    let served = server.get(&certificate_url).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.as_bytes().as_ref(), certificate.as_slice());
}

#[tokio::test]
async fn same_filename_twice_keeps_both_files() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    for content in [b"first".as_slice(), b"second".as_slice()] {
        let form = jane_doe_form()
            .add_part("birthCertificate", document("cert.pdf", "application/pdf", content));
        let response = server
            .post("/api/submit-application")
            .multipart(form)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let received = store.received();
    assert_eq!(received.len(), 2);
    assert_ne!(received[0]["birthCertificate"], received[1]["birthCertificate"]);
    assert_eq!(files_in(uploads.path()).len(), 2);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), 256).await;

    let form = jane_doe_form()
        .add_part("transcript", document("grades.pdf", "application/pdf", &[b'a'; 1024]));
    let response = server
        .post("/api/submit-application")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(store.received().is_empty());
    assert!(files_in(uploads.path()).is_empty());
}

#[tokio::test]
async fn malformed_requests_report_processing_error() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let response = server
        .post("/api/submit-application")
        .json(&json!({ "fullName": "Jane Doe" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.starts_with(PROCESSING_PREFIX));

    let response = server
        .post("/api/submit-application")
        .content_type("multipart/form-data; boundary=----AdmissionsFormBoundary")
        .bytes("no multipart content here".into())
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    assert!(store.received().is_empty());
}

#[tokio::test]
async fn unreachable_store_reports_processing_error() {
    let uploads = TempDir::new().unwrap();
    let server = gateway_server("http://127.0.0.1:1", uploads.path(), MAX_BODY).await;

    let form = jane_doe_form()
        .add_part("birthCertificate", document("cert.pdf", "application/pdf", b"%PDF"));
    let response = server
        .post("/api/submit-application")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.starts_with(PROCESSING_PREFIX));
    // The store may have committed before the connection failed, so the file stays.
    assert_eq!(files_in(uploads.path()).len(), 1);
}

#[tokio::test]
async fn session_reflects_token_expiry() {
    let store = MockStore::accepting().await;
    let uploads = TempDir::new().unwrap();
    let server = gateway_server(&store.url, uploads.path(), MAX_BODY).await;

    let response = server.get("/api/session").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "authenticated": false }));

    let response = server
        .get("/api/session")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", LIVE_TOKEN)).unwrap(),
        )
        .await;
    assert_eq!(response.json::<Value>(), json!({ "authenticated": true }));

    let response = server
        .get("/api/session")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", EXPIRED_TOKEN)).unwrap(),
        )
        .await;
    assert_eq!(response.json::<Value>(), json!({ "authenticated": false }));

    let response = server
        .get("/api/session")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-token"))
        .await;
    assert_eq!(response.json::<Value>(), json!({ "authenticated": false }));
}
