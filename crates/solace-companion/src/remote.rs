//! OpenAI-compatible chat-completions client.
//!
//! Defaults target DashScope's compatible mode (`qwen-plus`), but any
//! endpoint speaking the same request/response shape works.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::prompt::ChatMessage;

pub const DEFAULT_API_URL: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "qwen-plus";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 200;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed completion payload: {0}")]
    Malformed(String),
}

/// Something that turns a message list into one assistant reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Single-attempt client: no retries, failures go straight back to the caller.
pub struct RemoteCompletion {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteCompletion {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl CompletionBackend for RemoteCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RemoteError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let res = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        debug!("Completion API responded with {}", status);
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RemoteError::Status { status, body });
        }

        let raw = res.text().await?;
        let parsed: CompletionResponse =
            serde_json::from_str(&raw).map_err(|e| RemoteError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| RemoteError::Malformed("no message content in first choice".into()))
    }
}
