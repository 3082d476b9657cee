use colloquy_gateway::types::MessageList;
use colloquy_gateway::{
    ErrorClass, GatewayError, MessageObject, MessageRole, RunObject, RunStatus, ThreadObject,
};

#[test]
fn test_thread_object_deserialization() {
    let json = r#"{
        "id": "thread_abc123",
        "object": "thread",
        "created_at": 1699012949,
        "metadata": {"topic": "support"}
    }"#;

    let thread: ThreadObject = serde_json::from_str(json).unwrap();
    assert_eq!(thread.id, "thread_abc123");
    assert_eq!(thread.created_at, 1699012949);
    assert_eq!(thread.metadata["topic"], "support");
}

#[test]
fn test_thread_object_without_metadata() {
    let json = r#"{"id": "thread_abc123", "created_at": 1699012949}"#;

    let thread: ThreadObject = serde_json::from_str(json).unwrap();
    assert!(thread.metadata.is_null());
}

#[test]
fn test_run_status_deserialization() {
    let status: RunStatus = serde_json::from_str("\"in_progress\"").unwrap();
    assert_eq!(status, RunStatus::InProgress);

    let status: RunStatus = serde_json::from_str("\"requires_action\"").unwrap();
    assert_eq!(status, RunStatus::RequiresAction);
}

#[test]
fn test_run_status_terminality() {
    assert!(RunStatus::Completed.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
    assert!(RunStatus::Cancelled.is_terminal());
    assert!(RunStatus::Expired.is_terminal());

    assert!(!RunStatus::Queued.is_terminal());
    assert!(!RunStatus::InProgress.is_terminal());
    assert!(!RunStatus::RequiresAction.is_terminal());
}

#[test]
fn test_run_status_display() {
    assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
    assert_eq!(RunStatus::Completed.to_string(), "completed");
}

#[test]
fn test_run_object_deserialization() {
    let json = r#"{
        "id": "run_xyz",
        "object": "thread.run",
        "thread_id": "thread_abc123",
        "status": "failed",
        "last_error": {"code": "server_error", "message": "boom"}
    }"#;

    let run: RunObject = serde_json::from_str(json).unwrap();
    assert_eq!(run.id, "run_xyz");
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.last_error.unwrap().code, "server_error");
}

#[test]
fn test_message_text_extraction() {
    let json = r#"{
        "id": "msg_1",
        "thread_id": "thread_abc123",
        "role": "assistant",
        "created_at": 1699012950,
        "content": [
            {"type": "text", "text": {"value": "hi ", "annotations": []}},
            {"type": "image_file", "image_file": {"file_id": "file_1"}},
            {"type": "text", "text": {"value": "there", "annotations": []}}
        ]
    }"#;

    let message: MessageObject = serde_json::from_str(json).unwrap();
    assert_eq!(message.role, MessageRole::Assistant);
    assert_eq!(message.text(), "hi there");
}

#[test]
fn test_message_without_content_is_empty() {
    let json = r#"{
        "id": "msg_1",
        "thread_id": "thread_abc123",
        "role": "assistant",
        "created_at": 1699012950
    }"#;

    let message: MessageObject = serde_json::from_str(json).unwrap();
    assert!(message.text().is_empty());
}

#[test]
fn test_message_list_newest_first() {
    let json = r#"{
        "object": "list",
        "data": [
            {"id": "msg_2", "thread_id": "t", "role": "assistant", "created_at": 2,
             "content": [{"type": "text", "text": {"value": "newest"}}]},
            {"id": "msg_1", "thread_id": "t", "role": "user", "created_at": 1,
             "content": [{"type": "text", "text": {"value": "oldest"}}]}
        ],
        "has_more": false
    }"#;

    let page: MessageList = serde_json::from_str(json).unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, "msg_2");
    assert!(!page.has_more);
}

#[test]
fn test_error_classification() {
    let err = GatewayError::Upstream {
        status: 503,
        message: "overloaded".to_string(),
    };
    assert_eq!(err.class(), ErrorClass::Transient);

    let err = GatewayError::Rejected {
        status: 400,
        message: "bad payload".to_string(),
    };
    assert_eq!(err.class(), ErrorClass::Invalid);

    let err = GatewayError::NotFound("thread".to_string());
    assert_eq!(err.class(), ErrorClass::NotFound);

    let err = GatewayError::Decode("missing field".to_string());
    assert_eq!(err.class(), ErrorClass::Invalid);
}

#[test]
fn test_error_class_display() {
    assert_eq!(ErrorClass::Transient.to_string(), "transient");
    assert_eq!(ErrorClass::Invalid.to_string(), "invalid");
    assert_eq!(ErrorClass::NotFound.to_string(), "not_found");
}
