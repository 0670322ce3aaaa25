//! Project types.
//!
//! A [`Project`] is one game session: the player's startup, its pitch,
//! and the day/phase cursor the game-flow driver advances.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Phase of the daily gameplay cycle.
///
/// Advances `setup → standup → working → day_end`, then back to
/// `standup` when the next day starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial project setup; team not finalized yet.
    Setup,
    /// Morning standup in progress.
    Standup,
    /// Working hours.
    Working,
    /// Day wrapped up.
    DayEnd,
}

impl Phase {
    /// Canonical storage identifier for this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Standup => "standup",
            Self::Working => "working",
            Self::DayEnd => "day_end",
        }
    }

    /// Parse a phase string.
    pub fn parse(phase: &str) -> Option<Self> {
        match phase {
            "setup" => Some(Self::Setup),
            "standup" => Some(Self::Standup),
            "working" => Some(Self::Working),
            "day_end" => Some(Self::DayEnd),
            _ => None,
        }
    }
}

/// A game session: one startup run by one player.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Unique identifier.
    pub id: Uuid,
    /// The player's display name.
    pub player_name: String,
    /// The startup's name.
    pub name: String,
    /// What the startup is building; interpolated into every persona
    /// prompt.
    pub description: String,
    /// Optional linked source-control location.
    pub repo_url: Option<String>,
    /// Current in-game day, monotonically non-decreasing.
    pub current_day: u32,
    /// Current phase of the daily cycle.
    pub phase: Phase,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project in the setup phase on day zero.
    pub fn new(
        player_name: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            player_name: player_name.into(),
            name: name.into(),
            description: description.into(),
            repo_url: None,
            current_day: 0,
            phase: Phase::Setup,
            created_at: Utc::now(),
        }
    }

    /// Set the linked repository URL.
    #[must_use]
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    /// Advance to the next in-game day.
    pub fn advance_day(&mut self) {
        self.current_day += 1;
    }

    /// Move the project into a new phase.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}
