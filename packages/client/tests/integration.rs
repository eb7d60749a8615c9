//! Integration tests for the BAAC backend client
//!
//! Each test stands up a mock backend and drives one endpoint through the
//! public client surface.

use baac_client::{BaacClient, ChatQuery, ClientError, DocumentSubmission};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn direct_request_query(prompt: &str, chat_id: Option<i64>) -> ChatQuery {
    ChatQuery {
        prompt: prompt.to_string(),
        chat_id,
        is_direct_document_request: true,
        contains_document_type: true,
        contains_document_word: false,
        contains_interrogative: false,
        starts_with_interrogative: false,
        requested_doc_type: Some("barangay clearance".to_string()),
    }
}

#[tokio::test]
async fn test_send_prompt_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get_response"))
        .and(body_json(json!({
            "prompt": "I need a barangay clearance",
            "chat_id": 7,
            "isDirectDocumentRequest": true,
            "containsDocumentType": true,
            "containsDocumentWord": false,
            "containsInterrogative": false,
            "startsWithInterrogative": false,
            "requestedDocType": "barangay clearance"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "I can help you request a Barangay clearance.",
            "suggestForm": true,
            "formType": "barangay clearance"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let reply = client
        .send_prompt(&direct_request_query("I need a barangay clearance", Some(7)))
        .await
        .unwrap();

    assert_eq!(
        reply.response.as_deref(),
        Some("I can help you request a Barangay clearance.")
    );
    assert!(reply.suggest_form);
    assert_eq!(reply.form_type.as_deref(), Some("barangay clearance"));
    assert!(!reply.requires_auth);
}

#[tokio::test]
async fn test_send_prompt_surfaces_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get_response"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Prompt is required"})),
        )
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let reply = client
        .send_prompt(&direct_request_query("", None))
        .await
        .unwrap();

    // Backend errors travel inside the reply body, not as a client error.
    assert!(reply.response.is_none());
    assert_eq!(reply.error.as_deref(), Some("Prompt is required"));
}

#[tokio::test]
async fn test_send_prompt_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get_response"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client
        .send_prompt(&direct_request_query("hello", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse { .. }));
}

fn clearance_submission(chat_id: Option<i64>) -> DocumentSubmission {
    DocumentSubmission {
        document_types: vec!["barangay clearance".to_string()],
        date: "2025-06-09".to_string(),
        purpose: "Employment requirement".to_string(),
        clearance_copies: 1,
        indigency_copies: 0,
        residency_copies: 0,
        chat_id,
    }
}

#[tokio::test]
async fn test_submit_document_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_document"))
        .and(body_json(json!({
            "document_types": ["barangay clearance"],
            "date": "2025-06-09",
            "purpose": "Employment requirement",
            "copyC": 1,
            "copyI": 0,
            "copyR": 0,
            "chat_id": 42
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": "Your Barangay Clearance request has been submitted."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let confirmation = client
        .submit_document(&clearance_submission(Some(42)))
        .await
        .unwrap();

    assert_eq!(
        confirmation,
        "Your Barangay Clearance request has been submitted."
    );
}

#[tokio::test]
async fn test_submit_document_daily_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_document"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "limit_info": {
                "document_type": "barangay indigency",
                "used": 5,
                "limit": 5,
                "reset_time": "2025-06-10T00:00:00+08:00"
            }
        })))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client
        .submit_document(&clearance_submission(None))
        .await
        .unwrap_err();

    assert!(err.is_limit_error());
    match err {
        ClientError::LimitExceeded(notice) => {
            assert_eq!(notice.document_type, "barangay indigency");
            assert_eq!(notice.used, 5);
            assert_eq!(notice.limit, 5);
            assert!(notice.reset_time.is_some());
        }
        other => panic!("Expected limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_document_rejection_uses_server_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_document"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Purpose is required"
        })))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client
        .submit_document(&clearance_submission(None))
        .await
        .unwrap_err();

    match err {
        ClientError::Rejected(msg) => assert_eq!(msg, "Purpose is required"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_document_rejection_falls_back_to_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_document"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "message": "Database unavailable"
        })))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client
        .submit_document(&clearance_submission(None))
        .await
        .unwrap_err();

    match err {
        ClientError::Rejected(msg) => assert_eq!(msg, "Database unavailable"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_document_plain_text_failure_keeps_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_document"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client
        .submit_document(&clearance_submission(None))
        .await
        .unwrap_err();

    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("Expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_copy_limits_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/copy-limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "limits": {
                "barangay clearance": {"used": 0, "limit": 1, "remaining": 1},
                "barangay indigency": {"used": 5, "limit": 5, "remaining": 0},
                "barangay residency": {"used": 1, "limit": 2, "remaining": 1}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let limits = client.copy_limits().await.unwrap();

    assert_eq!(limits.len(), 3);
    assert_eq!(limits["barangay indigency"].remaining, 0);
    assert_eq!(limits["barangay residency"].used, 1);
}

#[tokio::test]
async fn test_copy_limits_refusal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/copy-limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client.copy_limits().await.unwrap_err();

    match err {
        ClientError::Rejected(msg) => assert_eq!(msg, "Failed to load copy limits"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_today_date_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/today-date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"date": "2025-06-09"})))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    assert_eq!(client.today().await.unwrap(), "2025-06-09");
}

#[tokio::test]
async fn test_list_chats_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chats": [
                {"id": 2, "title": "Indigency request", "updated_at": "2025-06-09 08:15:00"},
                {"id": 1, "title": "New Chat", "updated_at": "2025-06-08 19:02:11"}
            ]
        })))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let chats = client.list_chats().await.unwrap();

    assert_eq!(chats.len(), 2);
    assert_eq!(chats[0].id, 2);
    assert_eq!(chats[0].title, "Indigency request");
    assert!(chats[0].updated_at.is_some());
}

#[tokio::test]
async fn test_list_chats_tolerates_missing_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    assert!(client.list_chats().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_chat_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/chats/new"))
        .and(body_json(json!({"title": "New Chat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "chat_id": 11,
            "title": "New Chat"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let chat = client.create_chat("New Chat").await.unwrap();

    assert_eq!(chat.id, 11);
    assert_eq!(chat.title, "New Chat");
}

#[tokio::test]
async fn test_create_chat_failure_fallback_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/chats/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client.create_chat("New Chat").await.unwrap_err();

    match err {
        ClientError::Rejected(msg) => assert_eq!(msg, "Failed to create new chat"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_messages_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/chats/5/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "messages": [
                {"message": "I need a barangay clearance", "is_user": 1},
                {"message": "I can help you request a Barangay clearance.", "is_user": 0}
            ]
        })))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let messages = client.chat_messages(5).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_user);
    assert!(!messages[1].is_user);
}

#[tokio::test]
async fn test_chat_messages_refusal_reads_as_empty_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/chats/9/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    assert!(client.chat_messages(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rename_and_delete_acknowledgements() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/chats/3/rename"))
        .and(body_json(json!({"title": "Clearance questions"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/user/chats/3/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    client.rename_chat(3, "Clearance questions").await.unwrap();
    client.delete_chat(3).await.unwrap();
}

#[tokio::test]
async fn test_rename_failure_uses_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/chats/3/rename"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Chat not found"
        })))
        .mount(&server)
        .await;

    let client = BaacClient::new(server.uri()).unwrap();
    let err = client.rename_chat(3, "Anything").await.unwrap_err();

    match err {
        ClientError::Rejected(msg) => assert_eq!(msg, "Chat not found"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    // Port 9 is the discard service; nothing listens there in CI.
    let client = BaacClient::new("http://127.0.0.1:9").unwrap();
    let err = client.today().await.unwrap_err();

    assert!(err.is_network_error());
}

#[test]
fn test_url_builders_trim_trailing_slash() {
    let client = BaacClient::new("http://localhost:5000/").unwrap();

    assert_eq!(client.base_url(), "http://localhost:5000");
    assert_eq!(
        client.preview_url(17),
        "http://localhost:5000/document/preview/17"
    );
    assert_eq!(client.admin_url(), "http://localhost:5000/admin");
}
