//! Bot orchestrator.
//!
//! A [`Bot`] wires one teammate persona to its configured LLM vendor:
//! it builds the persona system prompt, pulls background documents and
//! rolling history from the [`ContextStore`], invokes the provider
//! adapter, and records the exchanged turns.
//!
//! Bots are cheap, per-call values. All durable state lives behind the
//! store handle, so concurrent projects never share bot state.

use std::sync::Arc;

use uuid::Uuid;

use crate::conversation::{ConversationKind, Turn};
use crate::message::{ChatOptions, Message, Role};
use crate::project::Project;
use crate::provider::{ChatProvider, ProviderError, create_provider};
use crate::storage::{ContextStore, StorageError};
use crate::team::{Teammate, TeammateRole};

/// How many past turns feed a chat call.
const HISTORY_LIMIT: u32 = 20;

/// How many background documents feed a single call.
const CONTEXT_DOCUMENT_LIMIT: u32 = 3;

/// Error type for orchestrator operations.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// The provider call or adapter construction failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A context-store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Which conversation a recorded turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnScope {
    /// Conversation kind.
    pub kind: ConversationKind,
    /// Related entity disambiguating the conversation.
    pub related_id: Option<Uuid>,
}

impl TurnScope {
    /// Scope for a one-on-one chat with a teammate.
    pub fn one_on_one(teammate_id: Uuid) -> Self {
        Self {
            kind: ConversationKind::OneOnOne,
            related_id: Some(teammate_id),
        }
    }

    /// Scope for the setup-phase chat, keyed by the project itself.
    pub fn setup(project_id: Uuid) -> Self {
        Self {
            kind: ConversationKind::Setup,
            related_id: Some(project_id),
        }
    }

    /// Scope for a meeting conversation.
    pub fn meeting(meeting_id: Uuid) -> Self {
        Self {
            kind: ConversationKind::Meeting,
            related_id: Some(meeting_id),
        }
    }
}

/// Orchestrator for one teammate's conversations.
///
/// Constructed per call from a (teammate, project, credential) triple;
/// stateless across calls except through the context store.
pub struct Bot {
    teammate: Teammate,
    project: Project,
    provider: Box<dyn ChatProvider>,
    store: Arc<dyn ContextStore>,
}

impl Bot {
    /// Create a bot for a teammate, resolving the provider adapter
    /// from the teammate's configured vendor and model version.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownProvider`] if the teammate's
    /// provider identifier is not supported.
    pub fn new(
        teammate: Teammate,
        project: Project,
        credential: &str,
        store: Arc<dyn ContextStore>,
    ) -> Result<Self, ProviderError> {
        let provider = create_provider(&teammate.provider, credential, &teammate.model_version)?;
        Ok(Self {
            teammate,
            project,
            provider,
            store,
        })
    }

    /// Create a bot with an explicit provider adapter. Used by tests.
    pub fn with_provider(
        teammate: Teammate,
        project: Project,
        provider: Box<dyn ChatProvider>,
        store: Arc<dyn ContextStore>,
    ) -> Self {
        Self {
            teammate,
            project,
            provider,
            store,
        }
    }

    /// The teammate this bot speaks for.
    pub fn teammate(&self) -> &Teammate {
        &self.teammate
    }

    /// Build the persona system prompt.
    ///
    /// Stable for a given teammate+project pair: the text depends on
    /// the role, the project name and description, the specialty, the
    /// personality traits, and the display name, and never on
    /// conversation content.
    pub fn system_prompt(&self) -> String {
        let project_name = &self.project.name;
        let goal = &self.project.description;
        let specialty = &self.teammate.specialty;

        let mut prompt = match &self.teammate.role {
            TeammateRole::ProjectManager => format!(
                "You are a project manager at a startup called '{project_name}'. \
                 You're responsible for coordinating the team, creating tasks, scheduling \
                 meetings, and keeping the project on track. \
                 The project goal is: {goal}. \
                 Be professional but friendly. Focus on productivity and clear communication."
            ),
            TeammateRole::FrontendDeveloper => format!(
                "You are a frontend developer at a startup called '{project_name}'. \
                 Your specialty is: {specialty}. \
                 You're passionate about user experience and writing clean, maintainable code. \
                 The project goal is: {goal}. \
                 Be helpful and share your expertise when asked."
            ),
            TeammateRole::BackendDeveloper => format!(
                "You are a backend developer at a startup called '{project_name}'. \
                 Your specialty is: {specialty}. \
                 You focus on building robust, scalable systems and APIs. \
                 The project goal is: {goal}. \
                 Be detail-oriented and thoughtful about architecture."
            ),
            TeammateRole::Designer => format!(
                "You are a designer at a startup called '{project_name}'. \
                 Your specialty is: {specialty}. \
                 You care deeply about aesthetics, usability, and user experience. \
                 The project goal is: {goal}. \
                 Be creative and advocate for good design principles."
            ),
            TeammateRole::Devops => format!(
                "You are a DevOps engineer at a startup called '{project_name}'. \
                 Your specialty is: {specialty}. \
                 You focus on infrastructure, deployment, monitoring, and reliability. \
                 The project goal is: {goal}. \
                 Be pragmatic and security-conscious."
            ),
            TeammateRole::QaEngineer => format!(
                "You are a QA engineer at a startup called '{project_name}'. \
                 Your specialty is: {specialty}. \
                 You care about quality, testing, and catching bugs before they reach \
                 production. \
                 The project goal is: {goal}. \
                 Be thorough and detail-oriented."
            ),
            TeammateRole::Custom(role) => format!(
                "You are a team member at a startup called '{project_name}'. \
                 Your role is: {role}. \
                 The project goal is: {goal}."
            ),
        };

        if !self.teammate.personality_traits.is_empty() {
            prompt.push_str("\n\nYour personality: ");
            prompt.push_str(&self.teammate.personality_traits.join(", "));
        }

        prompt.push_str(&format!(
            "\n\nYour name is {}. Stay in character and be helpful to your teammates.",
            self.teammate.name
        ));

        prompt
    }

    /// Options shared by every call this bot makes.
    fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            system: Some(self.system_prompt()),
            temperature: Some(self.teammate.role.temperature()),
            max_tokens: None,
        }
    }

    /// Fetch background documents matching a query, rendered as
    /// context blocks.
    async fn relevant_context(&self, query: &str) -> Result<Vec<String>, StorageError> {
        let documents = self
            .store
            .search_documents(self.project.id, query, CONTEXT_DOCUMENT_LIMIT)
            .await?;

        Ok(documents
            .iter()
            .map(|d| format!("Document: {}\n{}", d.title, d.content))
            .collect())
    }

    /// Produce a reply to the player's message given prior history.
    ///
    /// History turns (oldest first) map onto chat roles: player turns
    /// become `user`, everything else `assistant`. The new message is
    /// appended last, prefixed with a context block when background
    /// documents match. Nothing is persisted here.
    ///
    /// # Errors
    ///
    /// Propagates provider and storage failures.
    pub async fn chat(&self, user_message: &str, history: &[Turn]) -> Result<String, BotError> {
        let context = self.relevant_context(user_message).await?;

        let mut messages: Vec<Message> = history
            .iter()
            .map(|turn| {
                let role = if turn.is_player {
                    Role::User
                } else {
                    Role::Assistant
                };
                Message::new(role, &turn.message)
            })
            .collect();

        let content = if context.is_empty() {
            user_message.to_string()
        } else {
            format!(
                "Context:\n{}\n\nMessage: {}",
                context.join("\n"),
                user_message
            )
        };
        messages.push(Message::new(Role::User, content));

        tracing::debug!(
            teammate = %self.teammate.name,
            history_len = history.len(),
            context_docs = context.len(),
            "bot: sending chat request"
        );

        let reply = self.provider.chat(&messages, &self.chat_options()).await?;
        Ok(reply)
    }

    /// Single-shot completion for status reports and list-generation
    /// prompts. Same persona and context pipeline as chat, but with no
    /// conversation history and no persistence.
    ///
    /// # Errors
    ///
    /// Propagates provider and storage failures.
    pub async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        let context = self.relevant_context(prompt).await?;

        let full_prompt = if context.is_empty() {
            prompt.to_string()
        } else {
            format!("Context:\n{}\n\n{}", context.join("\n"), prompt)
        };

        tracing::debug!(teammate = %self.teammate.name, "bot: sending generate request");

        let reply = self
            .provider
            .generate(&full_prompt, &self.chat_options())
            .await?;
        Ok(reply)
    }

    /// Load history for a scope, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn history(&self, scope: TurnScope, limit: u32) -> Result<Vec<Turn>, StorageError> {
        self.store
            .history(self.project.id, scope.kind, scope.related_id, limit)
            .await
    }

    /// Durably record one turn in a scope. Player turns carry no
    /// speaker; bot turns are attributed to this bot's teammate.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn record_turn(
        &self,
        scope: TurnScope,
        message: &str,
        is_player: bool,
    ) -> Result<(), StorageError> {
        let turn = if is_player {
            Turn::player(self.project.id, scope.kind, scope.related_id, message)
        } else {
            Turn::speaker(
                self.project.id,
                scope.kind,
                scope.related_id,
                self.teammate.id,
                message,
            )
        };
        self.store.append(&turn).await
    }

    /// Full conversational exchange: load history, record the player's
    /// turn, call the provider, record the reply.
    ///
    /// The player turn is appended BEFORE the provider call and is not
    /// rolled back on failure; the reply turn is appended only after a
    /// successful call. A failed call therefore leaves exactly the
    /// player's side of the exchange in the log.
    ///
    /// # Errors
    ///
    /// Propagates provider and storage failures.
    pub async fn respond(&self, scope: TurnScope, user_message: &str) -> Result<String, BotError> {
        let history = self.history(scope, HISTORY_LIMIT).await?;

        self.record_turn(scope, user_message, true).await?;

        let reply = self.chat(user_message, &history).await?;

        self.record_turn(scope, &reply, false).await?;

        Ok(reply)
    }
}
