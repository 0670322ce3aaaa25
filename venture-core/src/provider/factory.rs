//! Provider factory.
//!
//! Creates the appropriate [`ChatProvider`] adapter for a provider
//! identifier, a credential, and a human-facing model version.

use super::{AnthropicProvider, ChatProvider, GoogleProvider, OpenAiProvider, ProviderError};

/// Create a chat provider for the given vendor.
///
/// The identifier is matched case-insensitively and a small set of
/// aliases is accepted: `claude` ≡ `anthropic`, `chatgpt` ≡ `openai`,
/// `gemini` ≡ `google`. Construction is pure; no I/O happens until the
/// first [`chat`](ChatProvider::chat) call.
///
/// # Errors
///
/// Returns [`ProviderError::UnknownProvider`] for any other identifier.
///
/// # Examples
///
/// ```
/// use venture_core::provider::create_provider;
///
/// let provider = create_provider("Claude", "sk-ant-...", "claude-sonnet-4.5").unwrap();
/// assert_eq!(provider.provider_id(), "anthropic");
/// ```
pub fn create_provider(
    provider: &str,
    credential: &str,
    model_version: &str,
) -> Result<Box<dyn ChatProvider>, ProviderError> {
    match provider.to_lowercase().as_str() {
        "anthropic" | "claude" => Ok(Box::new(AnthropicProvider::new(credential, model_version))),
        "openai" | "chatgpt" => Ok(Box::new(OpenAiProvider::new(credential, model_version))),
        "google" | "gemini" => Ok(Box::new(GoogleProvider::new(credential, model_version))),
        unknown => Err(ProviderError::UnknownProvider(unknown.to_string())),
    }
}
