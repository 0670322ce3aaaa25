//! LLM provider abstraction layer.
//!
//! Defines the [`ChatProvider`] trait that all vendor adapters fulfill,
//! the [`ProviderError`] taxonomy, and the adapter implementations for
//! the three supported vendor families.

mod anthropic;
mod factory;
mod google;
mod mock;
mod openai;

pub use anthropic::AnthropicProvider;
pub use factory::create_provider;
pub use google::GoogleProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::message::{ChatOptions, Message};

/// Fixed budget for one outbound vendor call, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Error type for provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider identifier is not one this crate supports.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// The vendor returned a non-2xx response.
    ///
    /// Carries the HTTP status and the raw body for diagnostics.
    #[error("provider returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code of the vendor response.
        status: u16,
        /// Raw response body as received.
        body: String,
    },

    /// The vendor responded 2xx but the body did not match the
    /// expected shape. Treated as a vendor contract violation.
    #[error("malformed provider response: {0}")]
    Protocol(String),

    /// The call exceeded the fixed request budget.
    #[error("provider call timed out after {0}s")]
    Timeout(u64),

    /// The request failed before a response was received.
    #[error("request failed: {0}")]
    RequestFailed(String),
}

impl ProviderError {
    /// Map a reqwest transport error onto the taxonomy.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(REQUEST_TIMEOUT_SECS)
        } else {
            ProviderError::RequestFailed(err.to_string())
        }
    }
}

/// Trait for LLM vendor adapters.
///
/// Implementations must be thread-safe (`Send + Sync`). Each invocation
/// of [`chat`](ChatProvider::chat) performs exactly one outbound network
/// call; there is no caching, retrying, or streaming in this layer.
///
/// # Examples
///
/// ```
/// use venture_core::provider::{ChatProvider, MockProvider};
/// use venture_core::message::{ChatOptions, Message, Role};
///
/// # async fn example() {
/// let provider = MockProvider::new().with_reply("On it.");
/// let messages = vec![Message::new(Role::User, "Status?")];
///
/// let reply = provider.chat(&messages, &ChatOptions::default()).await.unwrap();
/// assert_eq!(reply, "On it.");
/// # }
/// ```
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send role-tagged messages to the model and return its reply text.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] for non-2xx vendor responses
    /// - [`ProviderError::Protocol`] for unparseable 2xx bodies
    /// - [`ProviderError::Timeout`] when the fixed budget is exceeded
    /// - [`ProviderError::RequestFailed`] for other transport failures
    async fn chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<String, ProviderError>;

    /// Single-shot completion of a bare prompt.
    ///
    /// Wraps the prompt as one user message and delegates to
    /// [`chat`](ChatProvider::chat).
    async fn generate(
        &self,
        prompt: &str,
        options: &ChatOptions,
    ) -> Result<String, ProviderError> {
        let messages = vec![Message::new(crate::message::Role::User, prompt)];
        self.chat(&messages, options).await
    }

    /// Normalized identifier of the vendor family ("anthropic",
    /// "openai", "google").
    fn provider_id(&self) -> &'static str;

    /// The human-facing model version this adapter was configured with.
    fn model_version(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::UnknownProvider("mistral".to_string());
        assert_eq!(err.to_string(), "unknown provider: mistral");

        let err = ProviderError::Api {
            status: 500,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "provider returned HTTP 500: overloaded");

        let err = ProviderError::Timeout(60);
        assert_eq!(err.to_string(), "provider call timed out after 60s");
    }

    #[tokio::test]
    async fn test_chat_provider_is_object_safe() {
        use crate::message::{ChatOptions, Message, Role};

        let provider: Box<dyn ChatProvider> = Box::new(MockProvider::new());
        let messages = vec![Message::new(Role::User, "Hi")];

        let reply = provider.chat(&messages, &ChatOptions::default()).await;
        assert!(reply.is_ok());
    }

    #[tokio::test]
    async fn test_generate_delegates_to_chat() {
        let provider = MockProvider::new().with_reply("Generated.");
        let reply = provider
            .generate("Write a summary.", &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "Generated.");
    }
}
