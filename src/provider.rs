//! Chat-completion provider client.
//!
//! One parameterized client covers both backends (OpenAI and OpenRouter);
//! they share an identical request/response shape, so [`crate::config::ProviderKind`]
//! only supplies the endpoint URL and default model.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::SessionConfig;
use crate::models::Message;

/// Upper bound on one provider round trip. No retry on expiry; the error
/// surfaces to the user and the turn can be resent.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, DNS, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected completion shape
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, PartialEq)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Stateless request/response adapter for the chat-completion backends.
///
/// Holds only a reusable HTTP client; all per-connection parameters travel
/// in the [`SessionConfig`] passed to each call.
pub struct ProviderClient {
    client: Client,
    /// Test hook: replaces the provider's base URL when set
    base_url_override: Option<String>,
}

impl ProviderClient {
    /// Create a client with the default request timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url_override: None,
        }
    }

    /// Create a client pointed at a custom base URL (used in tests to
    /// target a mock server for both endpoints).
    pub fn with_base_url(base_url: String) -> Self {
        let mut this = Self::new();
        this.base_url_override = Some(base_url);
        this
    }

    fn base_url<'a>(&'a self, config: &SessionConfig) -> &'a str {
        match &self.base_url_override {
            Some(url) => url,
            None => config.provider.base_url(),
        }
    }

    /// Probe the provider's model-listing endpoint with the user's
    /// credential.
    ///
    /// Returns `Ok(true)` only on HTTP 200. A reachable server answering
    /// with any other status yields `Ok(false)`; transport failures
    /// propagate as errors. Both count as a failed health check.
    pub async fn health_check(&self, config: &SessionConfig) -> Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url(config));

        let response = self
            .client
            .get(&url)
            .bearer_auth(&config.api_key)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("health check against {} returned {}", config.provider.label(), status);
        Ok(status == reqwest::StatusCode::OK)
    }

    /// Request one complete assistant reply for the given transcript.
    ///
    /// The system prompt is prepended, then the transcript messages follow
    /// in order with roles preserved. The returned text is trimmed.
    pub async fn complete(
        &self,
        config: &SessionConfig,
        transcript: &[Message],
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url(config));

        let request = ChatRequest {
            model: &config.model,
            messages: build_messages(config, transcript),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status { status, message });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse {
                message: e.to_string(),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse {
                message: "response contained no completion text".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize the system prompt plus transcript into wire order.
fn build_messages<'a>(config: &'a SessionConfig, transcript: &'a [Message]) -> Vec<WireMessage<'a>> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(WireMessage {
        role: "system",
        content: &config.system_prompt,
    });
    for message in transcript {
        messages.push(WireMessage {
            role: message.role.as_str(),
            content: &message.content,
        });
    }
    messages
}
