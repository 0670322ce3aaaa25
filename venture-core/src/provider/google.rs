//! Google Gemini provider adapter.
//!
//! Implements the [`ChatProvider`] trait for Google's generateContent
//! API. The system prompt has no dedicated field here; it is folded in
//! as a synthetic leading user turn prefixed `"System: "`, and the
//! assistant role is renamed `model` on the wire.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatProvider, ProviderError, REQUEST_TIMEOUT_SECS};
use crate::message::{ChatOptions, Message, Role};

/// Google generateContent API base URL.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini provider.
pub struct GoogleProvider {
    /// HTTP client for API requests.
    client: reqwest::Client,
    /// Google API key; sent as a query parameter.
    api_key: String,
    /// Human-facing model version (e.g., "gemini-3.0").
    model_version: String,
    /// API base URL; overridable for tests.
    base_url: String,
}

impl GoogleProvider {
    /// Create a new Google provider.
    ///
    /// Construction performs no I/O.
    pub fn new(api_key: impl Into<String>, model_version: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model_version: model_version.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL. Used by tests against a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map the human-facing model version to Google's internal
    /// identifier. Unknown versions pass through unchanged.
    fn model_identifier(&self) -> &str {
        match self.model_version.as_str() {
            "gemini-3.0" | "gemini-3" | "3.0" => "gemini-pro",
            other => other,
        }
    }

    /// Convert neutral messages to Gemini `contents`, folding the
    /// system prompt in as a leading pseudo-turn.
    fn build_contents(messages: &[Message], system: Option<&str>) -> Vec<Content> {
        let mut contents = Vec::with_capacity(messages.len() + 1);

        if let Some(system) = system {
            contents.push(Content {
                role: "user",
                parts: vec![Part {
                    text: format!("System: {system}"),
                }],
            });
        }

        contents.extend(messages.iter().map(|m| Content {
            role: match m.role {
                Role::User => "user",
                Role::Assistant => "model",
            },
            parts: vec![Part {
                text: m.content.clone(),
            }],
        }));

        contents
    }
}

/// Request body for the generateContent API.
#[derive(Debug, Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// One conversational turn on the Gemini wire.
#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

/// Text part within a turn.
#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Generation parameters.
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Response body from the generateContent API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ChatProvider for GoogleProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<String, ProviderError> {
        let request = ApiRequest {
            contents: Self::build_contents(messages, options.system.as_deref()),
            generation_config: GenerationConfig {
                temperature: options.temperature_or_default(),
                max_output_tokens: options.max_tokens_or_default(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            self.model_identifier()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
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
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| {
                ProviderError::Protocol("response carried no candidate text".to_string())
            })
    }

    fn provider_id(&self) -> &'static str {
        "google"
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }
}
