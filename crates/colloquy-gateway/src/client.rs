// Assistant-service client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GatewayError, Result};
use crate::traits::AssistantGateway;
use crate::types::{MessageList, MessageObject, MessageRole, RunObject, ThreadObject};

const API_BASE: &str = "https://api.openai.com/v1";
const BETA_HEADER: &str = "assistants=v2";

/// HTTP implementation of [`AssistantGateway`].
///
/// The assistant id is fixed at construction: run submission requires it,
/// and the core never reads configuration state itself.
pub struct AssistantClient {
    http_client: reqwest::Client,
    base_url: String,
    assistant_id: String,
}

impl AssistantClient {
    /// Create a new client with API credentials and the assistant to drive.
    pub fn new(api_key: impl Into<String>, assistant_id: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| GatewayError::Config("invalid API key format".to_string()))?,
        );
        headers.insert(
            HeaderName::from_static("openai-beta"),
            HeaderValue::from_static(BETA_HEADER),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: API_BASE.to_string(),
            assistant_id: assistant_id.into(),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Value,
        what: &str,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await?;
        Self::decode(response, what).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::decode(response, what).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_for(status, &body, what));
        }

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::Decode(format!("{what}: {e}")))
    }

    fn error_for(status: StatusCode, body: &str, what: &str) -> GatewayError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .map(|e| e.message)
            .unwrap_or_else(|| body.to_string());

        if status == StatusCode::NOT_FOUND {
            GatewayError::NotFound(what.to_string())
        } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            GatewayError::Upstream {
                status: status.as_u16(),
                message,
            }
        } else {
            GatewayError::Rejected {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Error envelope the service wraps failures in.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl AssistantGateway for AssistantClient {
    async fn create_thread(&self) -> Result<ThreadObject> {
        let thread: ThreadObject = self
            .post_json("/threads", &serde_json::json!({}), "thread")
            .await?;
        tracing::debug!(thread_id = %thread.id, "thread created upstream");
        Ok(thread)
    }

    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<MessageObject> {
        let payload = serde_json::json!({
            "role": role,
            "content": text,
        });
        let message: MessageObject = self
            .post_json(
                &format!("/threads/{thread_id}/messages"),
                &payload,
                "message",
            )
            .await?;
        tracing::debug!(thread_id, message_id = %message.id, "message appended");
        Ok(message)
    }

    async fn submit_run(&self, thread_id: &str, instructions: &str) -> Result<RunObject> {
        let payload = serde_json::json!({
            "assistant_id": self.assistant_id,
            "instructions": instructions,
        });
        let run: RunObject = self
            .post_json(&format!("/threads/{thread_id}/runs"), &payload, "run")
            .await?;
        tracing::debug!(thread_id, run_id = %run.id, status = %run.status, "run submitted");
        Ok(run)
    }

    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunObject> {
        self.get_json(&format!("/threads/{thread_id}/runs/{run_id}"), "run")
            .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<MessageObject>> {
        let page: MessageList = self
            .get_json(&format!("/threads/{thread_id}/messages"), "messages")
            .await?;
        Ok(page.data)
    }
}
