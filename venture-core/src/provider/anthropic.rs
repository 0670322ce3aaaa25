//! Anthropic Claude provider adapter.
//!
//! Implements the [`ChatProvider`] trait for Anthropic's Messages API.
//! The system prompt travels as the dedicated `system` field of the
//! request envelope.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatProvider, ProviderError, REQUEST_TIMEOUT_SECS};
use crate::message::{ChatOptions, Message, Role};

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API endpoint.
const API_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic Claude provider.
///
/// # Examples
///
/// ```no_run
/// use venture_core::provider::{AnthropicProvider, ChatProvider};
/// use venture_core::message::{ChatOptions, Message, Role};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = AnthropicProvider::new("sk-ant-...", "claude-sonnet-4.5");
/// let messages = vec![Message::new(Role::User, "Hello, Claude!")];
///
/// let reply = provider.chat(&messages, &ChatOptions::default()).await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
pub struct AnthropicProvider {
    /// HTTP client for API requests.
    client: reqwest::Client,
    /// Anthropic API key.
    api_key: String,
    /// Human-facing model version (e.g., "claude-sonnet-4.5").
    model_version: String,
    /// API endpoint; overridable for tests.
    endpoint: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    ///
    /// Construction performs no I/O.
    pub fn new(api_key: impl Into<String>, model_version: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model_version: model_version.into(),
            endpoint: API_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint. Used by tests against a local mock.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Map the human-facing model version to Anthropic's internal
    /// identifier. Unknown versions pass through unchanged so future
    /// model names do not hard-fail.
    fn model_identifier(&self) -> &str {
        match self.model_version.as_str() {
            "claude-sonnet-4.5" | "sonnet-4.5" => "claude-sonnet-4-20250514",
            "claude-opus-4.5" | "opus-4.5" => "claude-opus-4-20250514",
            other => other,
        }
    }

    fn build_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: m.content.clone(),
            })
            .collect()
    }
}

/// Request body for the Anthropic Messages API.
#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

/// A single message in the API request.
#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

/// Response body from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

/// Content block in the API response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<String, ProviderError> {
        let request = ApiRequest {
            model: self.model_identifier().to_string(),
            messages: Self::build_api_messages(messages),
            max_tokens: options.max_tokens_or_default(),
            temperature: options.temperature_or_default(),
            system: options.system.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable body".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Protocol(format!("failed to parse response: {e}")))?;

        api_response
            .content
            .first()
            .and_then(|block| block.text.clone())
            .ok_or_else(|| {
                ProviderError::Protocol("response carried no text content".to_string())
            })
    }

    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_api_request_serialization() {
        let request = ApiRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            messages: vec![ApiMessage {
                role: "user",
                content: "Hello, Claude".to_string(),
            }],
            max_tokens: 4096,
            temperature: 0.7,
            system: None,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "claude-sonnet-4-20250514");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello, Claude");
        assert!(json.get("system").is_none());
    }

    #[test]
    fn test_api_request_serialization_with_system() {
        let request = ApiRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            messages: vec![ApiMessage {
                role: "user",
                content: "Hello".to_string(),
            }],
            max_tokens: 1024,
            temperature: 0.5,
            system: Some("You are a backend developer.".to_string()),
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["system"], "You are a backend developer.");
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn test_api_response_parsing() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "Happy to help."}
            ]
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.content.len(), 1);
        assert_eq!(response.content[0].text, Some("Happy to help.".to_string()));
    }

    #[test]
    fn test_model_identifier_known_versions() {
        let provider = AnthropicProvider::new("k", "claude-sonnet-4.5");
        assert_eq!(provider.model_identifier(), "claude-sonnet-4-20250514");

        let provider = AnthropicProvider::new("k", "opus-4.5");
        assert_eq!(provider.model_identifier(), "claude-opus-4-20250514");
    }

    #[test]
    fn test_model_identifier_unknown_passes_through() {
        let provider = AnthropicProvider::new("k", "claude-6-experimental");
        assert_eq!(provider.model_identifier(), "claude-6-experimental");
    }

    #[test]
    fn test_provider_id() {
        let provider = AnthropicProvider::new("k", "claude-sonnet-4.5");
        assert_eq!(provider.provider_id(), "anthropic");
        assert_eq!(provider.model_version(), "claude-sonnet-4.5");
    }

    #[tokio::test]
    async fn test_chat_success_extracts_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "Standup at nine."}]
            })))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new("test-key", "claude-sonnet-4.5")
            .with_endpoint(format!("{}/v1/messages", server.uri()));
        let messages = vec![Message::new(Role::User, "When is standup?")];

        let reply = provider
            .chat(&messages, &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "Standup at nine.");
    }

    #[tokio::test]
    async fn test_chat_non_2xx_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new("test-key", "claude-sonnet-4.5")
            .with_endpoint(server.uri());
        let messages = vec![Message::new(Role::User, "Hi")];

        let err = provider
            .chat(&messages, &ChatOptions::default())
            .await
            .unwrap_err();
        match err {
            ProviderError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_malformed_body_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new("test-key", "claude-sonnet-4.5")
            .with_endpoint(server.uri());
        let messages = vec![Message::new(Role::User, "Hi")];

        let err = provider
            .chat(&messages, &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Protocol(_)));
    }
}
