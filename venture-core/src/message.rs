//! Message types for the vendor-neutral chat contract.
//!
//! Provides the [`Role`] enum, the [`Message`] struct, and the
//! [`ChatOptions`] bag that every provider adapter accepts.

use serde::{Deserialize, Serialize};

/// Default sampling temperature when the caller does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output-token bound when the caller does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Role of a message in the conversation.
///
/// The system prompt is not a message role; it travels separately in
/// [`ChatOptions`] so each adapter can merge it the way its vendor
/// expects (dedicated field, prepended message, or pseudo-turn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Player input.
    User,
    /// Model response.
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The role of this message.
    pub role: Role,
    /// The text content of this message.
    pub content: String,
}

impl Message {
    /// Create a new message with the given role and content.
    ///
    /// # Examples
    ///
    /// ```
    /// use venture_core::message::{Message, Role};
    ///
    /// let msg = Message::new(Role::User, "Morning!");
    /// assert_eq!(msg.role, Role::User);
    /// assert_eq!(msg.content, "Morning!");
    /// ```
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Options accompanying a chat request.
///
/// All fields are optional; adapters fall back to
/// [`DEFAULT_TEMPERATURE`] and [`DEFAULT_MAX_TOKENS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    /// System prompt steering the persona.
    pub system: Option<String>,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens.
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    /// Effective temperature after applying the default.
    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Effective max-tokens bound after applying the default.
    pub fn max_tokens_or_default(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new_with_str() {
        let msg = Message::new(Role::User, "Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_new_with_string() {
        let msg = Message::new(Role::Assistant, String::from("Reply"));
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Reply");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_chat_options_defaults() {
        let opts = ChatOptions::default();
        assert_eq!(opts.system, None);
        assert_eq!(opts.temperature_or_default(), DEFAULT_TEMPERATURE);
        assert_eq!(opts.max_tokens_or_default(), DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_chat_options_overrides() {
        let opts = ChatOptions {
            system: Some("You are a designer.".to_string()),
            temperature: Some(0.8),
            max_tokens: Some(512),
        };
        assert_eq!(opts.temperature_or_default(), 0.8);
        assert_eq!(opts.max_tokens_or_default(), 512);
    }
}
