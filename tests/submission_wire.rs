//! Submission Wire Regression Tests
//!
//! Pins the exact JSON the backend expects and the shapes it answers with.
//! The backend contract predates this crate; none of these shapes are ours
//! to change.

use feedback_engine::client::{CATALOG_PATH, SUBMISSION_PATH, TOKEN_HEADER};
use feedback_engine::engine::validate;
use feedback_engine::types::{
    RawFeedbackCode, Role, SubmissionAck, SubmissionErrorBody,
};
use feedback_engine::{CodeCatalog, FormSession};
use std::sync::Arc;

fn dispute_catalog() -> Arc<CodeCatalog> {
    let raw: Vec<RawFeedbackCode> = serde_json::from_str(
        r#"[
            {"code": "DISPUTE", "use_sub_code": true, "category": "BOTH",
             "sub_code_options": {"Billing": ["Dispute Details", "Amount"]}},
            {"code": "PTP", "use_sub_code": false, "category": "BOTH",
             "fields": ["Amount"]}
        ]"#,
    )
    .unwrap();
    Arc::new(CodeCatalog::normalize(raw))
}

// ============================================================================
// Outbound Payload
// ============================================================================

#[test]
fn flat_code_payload_shape() {
    let mut session = FormSession::new(dispute_catalog(), Role::Admin);
    session.select_code("PTP");
    session.set_field("Amount", "5000");

    let submission = session.prepare_submission(17).unwrap();
    let json = serde_json::to_value(&submission).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "allocation_id": 17,
            "feedback": {
                "code": "PTP",
                "subCode": "",
                "Amount": "5000"
            }
        })
    );
}

#[test]
fn sub_code_payload_carries_the_sub_code() {
    let mut session = FormSession::new(dispute_catalog(), Role::Admin);
    session.select_code("DISPUTE");
    session.select_sub_code("Billing");
    session.set_field("Dispute Details", "double charge");
    session.set_field("Amount", "100");

    let submission = session.prepare_submission(99).unwrap();
    let json = serde_json::to_value(&submission).unwrap();

    assert_eq!(json["feedback"]["code"], "DISPUTE");
    assert_eq!(json["feedback"]["subCode"], "Billing");
    assert_eq!(json["feedback"]["Dispute Details"], "double charge");
    assert_eq!(json["feedback"]["Amount"], "100");
}

#[test]
fn payload_round_trips_through_serde() {
    let mut session = FormSession::new(dispute_catalog(), Role::Admin);
    session.select_code("PTP");
    session.set_field("Amount", "5000");

    let submission = session.prepare_submission(17).unwrap();
    let json = serde_json::to_string(&submission).unwrap();
    let parsed: feedback_engine::FeedbackSubmission = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, submission);
}

// ============================================================================
// Inbound Bodies
// ============================================================================

#[test]
fn success_ack_parses_message() {
    let ack: SubmissionAck = serde_json::from_str(r#"{"message": "Feedback recorded"}"#).unwrap();
    assert_eq!(ack.message, "Feedback recorded");

    let bare: SubmissionAck = serde_json::from_str("{}").unwrap();
    assert_eq!(bare.message, "");
}

#[test]
fn server_field_errors_merge_into_local_validation_output() {
    // Local validation finds the empty Amount; the backend then also
    // rejects Dispute Details. The form shows both through one map.
    let required = vec!["Amount".to_string(), "Dispute Details".to_string()];
    let mut values = std::collections::BTreeMap::new();
    values.insert("Dispute Details".to_string(), "double charge".to_string());

    let mut display = validate(&required, &values);
    assert_eq!(display.len(), 1);

    let server: SubmissionErrorBody = serde_json::from_str(
        r#"{"message": "rejected", "errors": {"Dispute Details": ["contains PII"]}}"#,
    )
    .unwrap();
    display.merge(server.field_errors());

    assert_eq!(display.len(), 2);
    assert_eq!(
        display.get("Dispute Details").unwrap(),
        ["contains PII".to_string()]
    );
    assert_eq!(display.field_list(), "Amount, Dispute Details");
}

#[test]
fn error_body_tolerates_every_shape_the_backend_sends() {
    let with_message: SubmissionErrorBody =
        serde_json::from_str(r#"{"message": "account closed"}"#).unwrap();
    assert_eq!(with_message.display_message(), Some("account closed"));

    let with_error: SubmissionErrorBody =
        serde_json::from_str(r#"{"error": "internal"}"#).unwrap();
    assert_eq!(with_error.display_message(), Some("internal"));

    let empty: SubmissionErrorBody = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.display_message(), None);
    assert!(empty.field_errors().is_empty());
}

// ============================================================================
// Endpoint Contract
// ============================================================================

#[test]
fn endpoint_paths_and_auth_header_are_pinned() {
    assert_eq!(CATALOG_PATH, "/feedback_codes");
    assert_eq!(SUBMISSION_PATH, "/feedbacks");
    // Raw token header, not an Authorization/Bearer scheme.
    assert_eq!(TOKEN_HEADER, "Token");
}
