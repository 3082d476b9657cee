use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use colloquy_store::ThreadRecord;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub thread_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub metadata: serde_json::Value,
}

/// Create a new thread
#[utoipa::path(
    post,
    path = "/threads",
    responses(
        (status = 201, description = "Thread created", body = ThreadResponse),
        (status = 502, description = "Assistant service unavailable")
    ),
    tag = "threads"
)]
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<ThreadResponse>)> {
    let record = state.conversations.create_thread().await?;

    Ok((StatusCode::CREATED, Json(thread_to_response(record))))
}

/// Get a specific thread by ID
#[utoipa::path(
    get,
    path = "/threads/{thread_id}",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Thread details", body = ThreadResponse),
        (status = 404, description = "Thread not found")
    ),
    tag = "threads"
)]
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<ThreadResponse>> {
    let record = state.conversations.get_thread(&thread_id).await?;

    Ok(Json(thread_to_response(record)))
}

fn thread_to_response(record: ThreadRecord) -> ThreadResponse {
    ThreadResponse {
        thread_id: record.thread_id,
        created_at: record.created_at,
        metadata: record.metadata,
    }
}
