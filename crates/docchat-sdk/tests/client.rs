//! `DocChatClient` and the sessions against a mock HTTP backend.

use docchat_sdk::{
    AppShell, Backend, ChatSession, ClientConfig, DocChatClient, FileCandidate, MediaType,
    SdkError, UploadSession, CHAT_FALLBACK, UPLOAD_ALERT,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DocChatClient {
    DocChatClient::new(&ClientConfig::default().with_api_url(&server.uri())).unwrap()
}

fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, MediaType::pdf(), b"%PDF-1.4 test".to_vec())
}

fn ack() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "File uploaded and processed successfully!",
        "filename": "report.pdf",
    }))
}

#[tokio::test]
async fn upload_sends_multipart_field_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ack = client.upload(&pdf("report.pdf")).await.unwrap();
    assert_eq!(ack.filename.as_deref(), Some("report.pdf"));

    let request = &server.received_requests().await.unwrap()[0];
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"), "got {content_type}");

    let body = String::from_utf8_lossy(&request.body).to_lowercase();
    assert!(body.contains(r#"name="file""#), "body: {body}");
    assert!(body.contains(r#"filename="report.pdf""#), "body: {body}");
    assert!(body.contains("application/pdf"), "body: {body}");
    assert!(body.contains("%pdf-1.4 test"));
}

#[tokio::test]
async fn upload_accepts_any_json_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["ok"])))
        .mount(&server)
        .await;

    let ack = client_for(&server).upload(&pdf("a.pdf")).await.unwrap();
    assert_eq!(ack.filename, None);
}

#[tokio::test]
async fn upload_error_status_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Only PDF files are allowed" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).upload(&pdf("a.pdf")).await.unwrap_err();
    match err {
        SdkError::Status { status, detail } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(detail, "Only PDF files are allowed");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_body_is_exactly_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "What is on page 2?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "A table." })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).chat("What is on page 2?").await.unwrap();
    assert_eq!(reply.response, "A table.");
}

#[tokio::test]
async fn health_check_hits_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "DocChat API is running" })),
        )
        .mount(&server)
        .await;

    let status = client_for(&server).health().await.unwrap();
    assert_eq!(status.message, "DocChat API is running");
}

#[tokio::test]
async fn session_stops_batch_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut uploads = UploadSession::new();
    let report = uploads
        .submit(&client, vec![pdf("1.pdf"), pdf("2.pdf"), pdf("3.pdf")])
        .await;

    assert!(report.records.is_empty());
    assert_eq!(report.alert.unwrap().message, UPLOAD_ALERT);
    assert!(!uploads.is_uploading());
}

#[tokio::test]
async fn session_keeps_records_before_a_later_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ack())
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut uploads = UploadSession::new();
    let report = uploads
        .submit(&client, vec![pdf("1.pdf"), pdf("2.pdf"), pdf("3.pdf")])
        .await;

    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["1.pdf"]);
    assert_eq!(report.alert.unwrap().message, UPLOAD_ALERT);
    assert!(!uploads.is_uploading());

    let sent = server.received_requests().await.unwrap();
    assert_eq!(sent.len(), 2);
    assert!(!String::from_utf8_lossy(&sent[1].body).contains("3.pdf"));
}

#[tokio::test]
async fn chat_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "Error processing chat" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut chat = ChatSession::new();
    let reply = chat.send(&client, "Hello").await.cloned().unwrap();

    assert_eq!(reply.content, CHAT_FALLBACK);
    assert_eq!(chat.transcript().last().unwrap().content, CHAT_FALLBACK);
    assert_eq!(chat.transcript().len(), 3);
    assert!(!chat.is_pending());
}

#[tokio::test]
async fn shell_round_trip_against_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ack())
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut shell = AppShell::new();

    let selection = vec![
        pdf("a.pdf"),
        FileCandidate::new("b.docx", MediaType::from_path("b.docx"), vec![0]),
        pdf("c.pdf"),
    ];
    assert!(shell.submit_files(&client, selection).await.is_none());
    let names: Vec<_> = shell.files().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "c.pdf"]);

    assert_eq!(shell.send_chat(&client, "Hello").await.as_deref(), Some("Hi"));
    assert_eq!(shell.chat().transcript().len(), 3);
}

#[tokio::test]
async fn chat_non_json_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut chat = ChatSession::new();
    let reply = chat.send(&client, "Hello").await.cloned().unwrap();

    assert_eq!(reply.content, CHAT_FALLBACK);
    assert!(!chat.is_pending());
}

#[tokio::test]
async fn unreachable_backend_falls_back() {
    let client =
        DocChatClient::new(&ClientConfig::default().with_api_url("http://127.0.0.1:1")).unwrap();
    let mut chat = ChatSession::new();

    let reply = chat.send(&client, "anyone there?").await.cloned().unwrap();
    assert_eq!(reply.content, CHAT_FALLBACK);
}
