use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use colloquy_gateway::{MessageObject, MessageRole};

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub prompt: String,
    /// Optional wall-clock bound for the run, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub thread_id: String,
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message_id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<MessageResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_assistant_reply: Option<String>,
}

/// Send a user message and wait for the assistant's reply
#[utoipa::path(
    post,
    path = "/threads/{thread_id}/messages",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Assistant reply", body = SendMessageResponse),
        (status = 400, description = "Empty prompt"),
        (status = 404, description = "Thread not found"),
        (status = 409, description = "A run is already in flight for this thread"),
        (status = 502, description = "Assistant service failed"),
        (status = 504, description = "Run did not complete in time")
    ),
    tag = "messages"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    let timeout = req.timeout_secs.map(Duration::from_secs);

    let reply = state
        .conversations
        .send_message(&thread_id, &req.prompt, timeout)
        .await?;

    Ok(Json(SendMessageResponse { thread_id, reply }))
}

/// List messages in a thread, newest first
#[utoipa::path(
    get,
    path = "/threads/{thread_id}/messages",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Thread transcript", body = ListMessagesResponse),
        (status = 404, description = "Thread not found")
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<ListMessagesResponse>> {
    let (messages, latest_assistant_reply) =
        state.conversations.thread_messages(&thread_id).await?;

    let messages = messages.into_iter().map(message_to_response).collect();

    Ok(Json(ListMessagesResponse {
        messages,
        latest_assistant_reply,
    }))
}

fn message_to_response(message: MessageObject) -> MessageResponse {
    let content = message.text();
    MessageResponse {
        message_id: message.id,
        thread_id: message.thread_id,
        role: message.role,
        content,
        created_at: message.created_at,
    }
}
