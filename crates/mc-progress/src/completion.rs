//! Completion API client
//!
//! Chat-style completion over HTTP. The client is behind a trait so the
//! calculator can be exercised with a scripted fake in tests; the real
//! implementation posts to an OpenAI-compatible `/chat/completions`
//! endpoint with a bounded request timeout.

use async_trait::async_trait;
use mc_core::config::CompletionSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Errors from the completion call. All of them collapse into
/// `ProgressError::LlmUnavailable` at the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion API returned status {status}")]
    Status { status: u16 },

    #[error("completion API returned an empty response")]
    EmptyResponse,

    #[error("invalid completion client configuration: {0}")]
    Config(String),
}

/// A single completion exchange: a system instruction and a user prompt.
/// Model, token budget, and temperature are client configuration, not
/// per-call inputs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

/// Trait for completion backends
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the raw text of the reply.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// Chat completion request body (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// HTTP-backed completion client
pub struct HttpCompletionClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl HttpCompletionClient {
    pub fn new(settings: &CompletionSettings) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_strips_trailing_slash() {
        let settings = CompletionSettings {
            api_base: "http://localhost:11434/v1/".into(),
            ..Default::default()
        };
        let client = HttpCompletionClient::new(&settings).unwrap();
        assert_eq!(client.api_base, "http://localhost:11434/v1");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"45"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("45")
        );
    }

    #[test]
    fn test_response_with_null_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
