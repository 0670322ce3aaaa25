//! Conversation types.
//!
//! A [`Turn`] is one persisted message in a project's chat log, scoped
//! by a [`ConversationKind`] and an optional related entity. Turns are
//! append-only; history is replayed in strict chronological order.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of conversation a turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    /// A private chat between the player and one teammate; the related
    /// id is the teammate.
    OneOnOne,
    /// The setup-phase chat with the project manager; the related id
    /// is the project itself.
    Setup,
    /// A multi-participant meeting; the related id is the meeting.
    Meeting,
}

impl ConversationKind {
    /// Canonical storage identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneOnOne => "one_on_one",
            Self::Setup => "setup",
            Self::Meeting => "meeting",
        }
    }

    /// Parse a kind string.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "one_on_one" => Some(Self::OneOnOne),
            "setup" => Some(Self::Setup),
            "meeting" => Some(Self::Meeting),
            _ => None,
        }
    }
}

/// One message in a persisted conversation.
///
/// `is_player == true` always goes with `speaker_id == None`; the
/// constructors enforce this pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Unique identifier (UUIDv7, time-sortable).
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Conversation this turn belongs to.
    pub kind: ConversationKind,
    /// The teammate or meeting this turn relates to, when scoped.
    pub related_id: Option<Uuid>,
    /// Speaking teammate; `None` means the player spoke.
    pub speaker_id: Option<Uuid>,
    /// Whether the player authored this turn.
    pub is_player: bool,
    /// Message text.
    pub message: String,
    /// When the turn was recorded.
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a player-authored turn.
    pub fn player(
        project_id: Uuid,
        kind: ConversationKind,
        related_id: Option<Uuid>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            kind,
            related_id,
            speaker_id: None,
            is_player: true,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a teammate-authored turn.
    pub fn speaker(
        project_id: Uuid,
        kind: ConversationKind,
        related_id: Option<Uuid>,
        speaker_id: Uuid,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            kind,
            related_id,
            speaker_id: Some(speaker_id),
            is_player: false,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// A background document in a project's knowledge base.
///
/// Retrieved by naive substring match against a query; a stand-in for
/// real retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document title.
    pub title: String,
    /// Document body.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ConversationKind::OneOnOne,
            ConversationKind::Setup,
            ConversationKind::Meeting,
        ] {
            assert_eq!(ConversationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ConversationKind::parse("group_chat"), None);
    }

    #[test]
    fn test_player_turn_has_no_speaker() {
        let turn = Turn::player(Uuid::now_v7(), ConversationKind::OneOnOne, None, "Hi");

        assert!(turn.is_player);
        assert_eq!(turn.speaker_id, None);
        assert_eq!(turn.message, "Hi");
        assert!(!turn.id.is_nil());
    }

    #[test]
    fn test_speaker_turn() {
        let speaker = Uuid::now_v7();
        let related = Uuid::now_v7();
        let turn = Turn::speaker(
            Uuid::now_v7(),
            ConversationKind::Meeting,
            Some(related),
            speaker,
            "On it.",
        );

        assert!(!turn.is_player);
        assert_eq!(turn.speaker_id, Some(speaker));
        assert_eq!(turn.related_id, Some(related));
    }
}
