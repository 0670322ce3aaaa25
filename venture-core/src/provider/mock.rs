//! Mock provider for testing.
//!
//! Provides [`MockProvider`], a configurable in-memory implementation
//! of [`ChatProvider`] used by orchestrator and policy tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatProvider, ProviderError};
use crate::message::{ChatOptions, Message};

/// A mock chat provider.
///
/// Returns configured replies in LIFO order (last added = first
/// returned) and falls back to a default reply when none remain. Can be
/// configured to fail instead, and records every request it receives
/// for later inspection.
///
/// # Examples
///
/// ```
/// use venture_core::provider::{ChatProvider, MockProvider};
/// use venture_core::message::{ChatOptions, Message, Role};
///
/// # async fn example() {
/// let provider = MockProvider::new().with_reply("All tests pass.");
/// let messages = vec![Message::new(Role::User, "CI status?")];
///
/// let reply = provider.chat(&messages, &ChatOptions::default()).await.unwrap();
/// assert_eq!(reply, "All tests pass.");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockProvider {
    replies: Mutex<Vec<String>>,
    fail_with_status: Mutex<Option<u16>>,
    requests: Mutex<Vec<(Vec<Message>, ChatOptions)>>,
}

impl MockProvider {
    /// Create a new mock provider with no configured replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reply to return on a later `chat` call (LIFO order).
    #[must_use]
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.lock_replies().push(content.into());
        self
    }

    /// Make every `chat` call fail with the given HTTP status.
    #[must_use]
    pub fn with_failure(self, status: u16) -> Self {
        *self
            .fail_with_status
            .lock()
            .unwrap_or_else(|p| p.into_inner()) = Some(status);
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<(Vec<Message>, ChatOptions)> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.replies.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<String, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((messages.to_vec(), options.clone()));

        if let Some(status) = *self
            .fail_with_status
            .lock()
            .unwrap_or_else(|p| p.into_inner())
        {
            return Err(ProviderError::Api {
                status,
                body: "mock failure".to_string(),
            });
        }

        Ok(self
            .lock_replies()
            .pop()
            .unwrap_or_else(|| "Mock reply".to_string()))
    }

    fn provider_id(&self) -> &'static str {
        "mock"
    }

    fn model_version(&self) -> &str {
        "mock-1"
    }
}
