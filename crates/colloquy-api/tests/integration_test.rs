use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use colloquy_api::{error::ApiError, service::ConversationService};
use colloquy_core::{OrchestrateError, OrchestratorConfig, RunOrchestrator};
use colloquy_gateway::{
    AssistantGateway, ErrorClass, GatewayError, MessageContent, MessageObject, MessageRole,
    RunObject, RunStatus, TextValue, ThreadObject,
};
use colloquy_store::{MemoryThreadStore, ThreadStore};

/// Minimal always-succeeding gateway: runs complete on the first status
/// fetch and the transcript holds one assistant reply.
struct HappyGateway;

#[async_trait]
impl AssistantGateway for HappyGateway {
    async fn create_thread(&self) -> colloquy_gateway::Result<ThreadObject> {
        Ok(ThreadObject {
            id: "thread_1".to_string(),
            created_at: 1699012949,
            metadata: json!({"source": "api"}),
        })
    }

    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> colloquy_gateway::Result<MessageObject> {
        Ok(MessageObject {
            id: "msg_user".to_string(),
            thread_id: thread_id.to_string(),
            role,
            created_at: 1,
            content: vec![MessageContent::Text {
                text: TextValue {
                    value: text.to_string(),
                },
            }],
        })
    }

    async fn submit_run(
        &self,
        thread_id: &str,
        _instructions: &str,
    ) -> colloquy_gateway::Result<RunObject> {
        Ok(RunObject {
            id: "run_1".to_string(),
            thread_id: thread_id.to_string(),
            status: RunStatus::Queued,
            last_error: None,
        })
    }

    async fn run_status(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> colloquy_gateway::Result<RunObject> {
        Ok(RunObject {
            id: run_id.to_string(),
            thread_id: thread_id.to_string(),
            status: RunStatus::Completed,
            last_error: None,
        })
    }

    async fn list_messages(
        &self,
        thread_id: &str,
    ) -> colloquy_gateway::Result<Vec<MessageObject>> {
        Ok(vec![MessageObject {
            id: "msg_reply".to_string(),
            thread_id: thread_id.to_string(),
            role: MessageRole::Assistant,
            created_at: 2,
            content: vec![MessageContent::Text {
                text: TextValue {
                    value: "hi there".to_string(),
                },
            }],
        }])
    }
}

fn service_with(gateway: Arc<dyn AssistantGateway>) -> ConversationService {
    let store: Arc<dyn ThreadStore> = Arc::new(MemoryThreadStore::new());
    let orchestrator = Arc::new(RunOrchestrator::new(
        gateway.clone(),
        store.clone(),
        OrchestratorConfig::default(),
    ));
    ConversationService::new(gateway, store, orchestrator, "Be helpful.")
}

#[tokio::test]
async fn test_create_then_send_message_round_trip() {
    let service = service_with(Arc::new(HappyGateway));

    let record = service.create_thread().await.unwrap();
    assert_eq!(record.thread_id, "thread_1");
    assert_eq!(record.metadata["source"], "api");

    let reply = service
        .send_message("thread_1", "hello", Some(Duration::from_secs(5)))
        .await
        .unwrap();
    assert_eq!(reply, "hi there");

    let (messages, latest) = service.thread_messages("thread_1").await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(latest.as_deref(), Some("hi there"));
}

#[tokio::test]
async fn test_send_message_to_unknown_thread_is_not_found() {
    let service = service_with(Arc::new(HappyGateway));

    let err = service
        .send_message("thread_unknown", "hello", None)
        .await
        .unwrap_err();

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_error_status_mapping() {
    let cases: Vec<(ApiError, StatusCode)> = vec![
        (
            ApiError::ThreadNotFound("t1".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::BadRequest("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::Orchestrate(OrchestrateError::RunInProgress("t1".to_string())),
            StatusCode::CONFLICT,
        ),
        (
            ApiError::Orchestrate(OrchestrateError::EmptyUserText("t1".to_string())),
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::Orchestrate(OrchestrateError::GatewayUnavailable {
                class: ErrorClass::Transient,
                source: GatewayError::Upstream {
                    status: 503,
                    message: "overloaded".to_string(),
                },
            }),
            StatusCode::BAD_GATEWAY,
        ),
        (
            ApiError::Orchestrate(OrchestrateError::RunFailed {
                run_id: "run_1".to_string(),
                status: RunStatus::Failed,
            }),
            StatusCode::BAD_GATEWAY,
        ),
        (
            ApiError::Orchestrate(OrchestrateError::RunTimeout {
                run_id: "run_1".to_string(),
                timeout: Duration::from_secs(5),
            }),
            StatusCode::GATEWAY_TIMEOUT,
        ),
        (
            ApiError::Orchestrate(OrchestrateError::NoAssistantReply("t1".to_string())),
            StatusCode::BAD_GATEWAY,
        ),
        (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_gateway_not_found_maps_to_404() {
    let error = ApiError::Gateway(GatewayError::NotFound("thread".to_string()));
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
