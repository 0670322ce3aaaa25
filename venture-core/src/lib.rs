//! Venture core library.
//!
//! Backend core for a browser-played startup-simulation game: the
//! player runs a fictional startup staffed by AI-driven teammates.
//! This crate provides the conversation and bot-orchestration
//! subsystem: the provider adapters over the supported LLM vendors,
//! the per-teammate context assembly, the persisted conversation log,
//! and the meeting turn-taking policy. HTTP routing, session handling,
//! and rendering live in the (separate) web layer.

pub mod bot;
pub mod config;
pub mod conversation;
pub mod credential;
pub mod meeting;
pub mod message;
pub mod project;
pub mod prompts;
pub mod provider;
pub mod storage;
pub mod team;

pub use bot::{Bot, BotError, TurnScope};
pub use config::Config;
pub use conversation::{ConversationKind, Document, Turn};
pub use credential::{CredentialError, CredentialSource};
pub use meeting::{Meeting, MeetingStatus, Participant, next_speaker};
pub use message::{ChatOptions, Message, Role};
pub use project::{Phase, Project};
pub use provider::{ChatProvider, ProviderError, create_provider};
pub use storage::{ContextStore, SqliteStore, StorageError};
pub use team::{Teammate, TeammateRole};
