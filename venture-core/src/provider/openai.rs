//! OpenAI ChatGPT provider adapter.
//!
//! Implements the [`ChatProvider`] trait for OpenAI's Chat Completions
//! API. The system prompt is prepended to the message list as a
//! `system`-role message.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatProvider, ProviderError, REQUEST_TIMEOUT_SECS};
use crate::message::{ChatOptions, Message, Role};

/// OpenAI Chat Completions API endpoint.
const API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI ChatGPT provider.
pub struct OpenAiProvider {
    /// HTTP client for API requests.
    client: reqwest::Client,
    /// OpenAI API key.
    api_key: String,
    /// Human-facing model version (e.g., "gpt-5.1").
    model_version: String,
    /// API endpoint; overridable for tests.
    endpoint: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider.
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

    /// Map the human-facing model version to OpenAI's internal
    /// identifier. Unknown versions pass through unchanged.
    fn model_identifier(&self) -> &str {
        match self.model_version.as_str() {
            "gpt-5.1" | "5.1" | "chatgpt-5.1" => "gpt-5.1-turbo",
            other => other,
        }
    }

    /// Build the outgoing message list, prepending the system prompt
    /// when present.
    fn build_api_messages(messages: &[Message], system: Option<&str>) -> Vec<ApiMessage> {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system {
            api_messages.push(ApiMessage {
                role: "system",
                content: system.to_string(),
            });
        }
        api_messages.extend(messages.iter().map(|m| ApiMessage {
            role: match m.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            content: m.content.clone(),
        }));
        api_messages
    }
}

/// Request body for the Chat Completions API.
#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// A single message in the API request.
#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

/// Response body from the Chat Completions API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

/// A choice in the API response.
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// Message content in a choice.
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<String, ProviderError> {
        let request = ApiRequest {
            model: self.model_identifier().to_string(),
            messages: Self::build_api_messages(messages, options.system.as_deref()),
            max_tokens: options.max_tokens_or_default(),
            temperature: options.temperature_or_default(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
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
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::Protocol("response carried no choices".to_string()))
    }

    fn provider_id(&self) -> &'static str {
        "openai"
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_system_prompt_prepended_as_message() {
        let messages = [
            Message::new(Role::User, "Q1"),
            Message::new(Role::Assistant, "A1"),
        ];
        let api_messages =
            OpenAiProvider::build_api_messages(&messages, Some("You are a QA engineer."));

        assert_eq!(api_messages.len(), 3);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[0].content, "You are a QA engineer.");
        assert_eq!(api_messages[1].role, "user");
        assert_eq!(api_messages[2].role, "assistant");
    }

    #[test]
    fn test_no_system_prompt_leaves_messages_untouched() {
        let messages = [Message::new(Role::User, "Q1")];
        let api_messages = OpenAiProvider::build_api_messages(&messages, None);

        assert_eq!(api_messages.len(), 1);
        assert_eq!(api_messages[0].role, "user");
    }

    #[test]
    fn test_model_identifier_mapping() {
        let provider = OpenAiProvider::new("k", "chatgpt-5.1");
        assert_eq!(provider.model_identifier(), "gpt-5.1-turbo");

        let provider = OpenAiProvider::new("k", "gpt-7-preview");
        assert_eq!(provider.model_identifier(), "gpt-7-preview");
    }

    #[test]
    fn test_api_response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Deploy is green."}}
            ]
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content,
            Some("Deploy is green.".to_string())
        );
    }

    #[tokio::test]
    async fn test_chat_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Shipping today."}}]
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new("test-key", "gpt-5.1").with_endpoint(server.uri());
        let messages = vec![Message::new(Role::User, "Status?")];

        let reply = provider
            .chat(&messages, &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "Shipping today.");
    }

    #[tokio::test]
    async fn test_chat_500_surfaces_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new("test-key", "gpt-5.1").with_endpoint(server.uri());
        let messages = vec![Message::new(Role::User, "Hi")];

        let err = provider
            .chat(&messages, &ChatOptions::default())
            .await
            .unwrap_err();
        match err {
            ProviderError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_empty_choices_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new("test-key", "gpt-5.1").with_endpoint(server.uri());
        let messages = vec![Message::new(Role::User, "Hi")];

        let err = provider
            .chat(&messages, &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Protocol(_)));
    }
}
