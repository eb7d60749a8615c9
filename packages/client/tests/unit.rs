//! Unit tests for BAAC client wire models

#[cfg(test)]
mod baac_client_unit_tests {
    use baac_client::api::SubmitReply;
    use baac_client::{
        ChatQuery, ChatReply, ChatSummary, ClientError, DocumentSubmission, LimitNotice,
        MessageRecord,
    };
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_chat_query_uses_backend_field_names() {
        let query = ChatQuery {
            prompt: "I need a barangay clearance".to_string(),
            chat_id: None,
            is_direct_document_request: true,
            contains_document_type: true,
            contains_document_word: false,
            contains_interrogative: false,
            starts_with_interrogative: false,
            requested_doc_type: Some("barangay clearance".to_string()),
        };

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({
                "prompt": "I need a barangay clearance",
                "chat_id": null,
                "isDirectDocumentRequest": true,
                "containsDocumentType": true,
                "containsDocumentWord": false,
                "containsInterrogative": false,
                "startsWithInterrogative": false,
                "requestedDocType": "barangay clearance"
            })
        );
    }

    #[test]
    fn test_chat_reply_defaults_when_fields_absent() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "Hello!"}"#).unwrap();

        assert_eq!(reply.response.as_deref(), Some("Hello!"));
        assert!(reply.error.is_none());
        assert!(!reply.suggest_form);
        assert!(!reply.suggest_all_documents);
        assert!(!reply.requires_auth);
        assert!(!reply.show_form_button);
        assert!(reply.form_type.is_none());
        assert!(reply.document_type.is_none());
    }

    #[test]
    fn test_chat_reply_parses_affordance_flags() {
        let reply: ChatReply = serde_json::from_value(json!({
            "response": "I can help you with that.",
            "suggestForm": true,
            "formType": "barangay indigency",
            "requiresAuth": false
        }))
        .unwrap();

        assert!(reply.suggest_form);
        assert_eq!(reply.form_type.as_deref(), Some("barangay indigency"));
        assert!(!reply.requires_auth);
    }

    #[test]
    fn test_submission_omits_chat_id_when_absent() {
        let submission = DocumentSubmission {
            document_types: vec!["barangay clearance".to_string()],
            date: "2025-06-09".to_string(),
            purpose: "Employment requirement".to_string(),
            clearance_copies: 1,
            indigency_copies: 0,
            residency_copies: 0,
            chat_id: None,
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value,
            json!({
                "document_types": ["barangay clearance"],
                "date": "2025-06-09",
                "purpose": "Employment requirement",
                "copyC": 1,
                "copyI": 0,
                "copyR": 0
            })
        );
    }

    #[test]
    fn test_submission_includes_chat_id_when_present() {
        let submission = DocumentSubmission {
            document_types: vec!["barangay residency".to_string()],
            date: "2025-06-09".to_string(),
            purpose: "School enrollment".to_string(),
            clearance_copies: 0,
            indigency_copies: 0,
            residency_copies: 2,
            chat_id: Some(42),
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["chat_id"], json!(42));
        assert_eq!(value["copyR"], json!(2));
    }

    #[test]
    fn test_limit_notice_parses_rfc3339_reset_time() {
        let notice: LimitNotice = serde_json::from_value(json!({
            "document_type": "barangay indigency",
            "used": 5,
            "limit": 5,
            "reset_time": "2025-01-02T00:00:00+08:00"
        }))
        .unwrap();

        assert_eq!(notice.document_type, "barangay indigency");
        assert_eq!(notice.used, 5);
        assert_eq!(notice.limit, 5);
        assert_eq!(
            notice.reset_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 16, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_limit_notice_parses_epoch_millis_reset_time() {
        let notice: LimitNotice = serde_json::from_value(json!({
            "document_type": "barangay clearance",
            "used": 1,
            "limit": 1,
            "reset_time": 1735689600000i64
        }))
        .unwrap();

        assert_eq!(
            notice.reset_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_limit_notice_tolerates_unparseable_reset_time() {
        let notice: LimitNotice = serde_json::from_value(json!({
            "document_type": "barangay residency",
            "used": 2,
            "limit": 2,
            "reset_time": "soon"
        }))
        .unwrap();

        assert!(notice.reset_time.is_none());
    }

    #[test]
    fn test_chat_summary_parses_sqlite_timestamp() {
        let summary: ChatSummary = serde_json::from_value(json!({
            "id": 3,
            "title": "Clearance questions",
            "updated_at": "2025-06-08 14:30:00"
        }))
        .unwrap();

        assert_eq!(summary.id, 3);
        assert_eq!(summary.title, "Clearance questions");
        assert!(summary.updated_at.is_some());
    }

    #[test]
    fn test_chat_summary_tolerates_missing_timestamp() {
        let summary: ChatSummary = serde_json::from_value(json!({
            "id": 4,
            "title": "New Chat"
        }))
        .unwrap();

        assert!(summary.updated_at.is_none());
    }

    #[test]
    fn test_message_record_accepts_integer_flags() {
        let from_user: MessageRecord =
            serde_json::from_value(json!({"message": "hi", "is_user": 1})).unwrap();
        let from_bot: MessageRecord =
            serde_json::from_value(json!({"message": "hello", "is_user": 0})).unwrap();
        let boolean: MessageRecord =
            serde_json::from_value(json!({"message": "hey", "is_user": true})).unwrap();

        assert!(from_user.is_user);
        assert!(!from_bot.is_user);
        assert!(boolean.is_user);
    }

    #[test]
    fn test_submit_reply_carries_limit_info() {
        let reply: SubmitReply = serde_json::from_value(json!({
            "limit_info": {
                "document_type": "barangay indigency",
                "used": 5,
                "limit": 5,
                "reset_time": "2025-01-02T00:00:00Z"
            }
        }))
        .unwrap();

        assert!(!reply.success);
        let notice = reply.limit_info.unwrap();
        assert_eq!(notice.used, 5);
        assert_eq!(notice.limit, 5);
    }

    #[test]
    fn test_error_helpers() {
        let invalid = ClientError::invalid("/get_response", "expected JSON");
        assert!(matches!(invalid, ClientError::InvalidResponse { .. }));
        assert!(!invalid.is_network_error());

        let rejected = ClientError::rejected("Failed to rename chat");
        assert!(matches!(rejected, ClientError::Rejected(_)));
        assert_eq!(rejected.to_string(), "Request rejected: Failed to rename chat");

        let network = ClientError::Network("connection refused".to_string());
        assert!(network.is_network_error());
        assert!(!network.is_limit_error());
    }
}
