//! Meeting types and the turn-taking policy.
//!
//! A [`Meeting`] groups a topic, a schedule slot, and a participant
//! set. [`next_speaker`] decides which non-player participant responds
//! to the latest message.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use uuid::Uuid;

/// Lifecycle status of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    /// Created but not started.
    Scheduled,
    /// Currently running.
    InProgress,
    /// Wrapped up; notes recorded.
    Completed,
}

impl MeetingStatus {
    /// Canonical storage identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// One attendee of a meeting: either the player or a teammate.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// The attending teammate; `None` for the player.
    pub teammate_id: Option<Uuid>,
    /// Display name used for direct-address matching.
    pub name: String,
    /// Whether this entry is the player.
    pub is_player: bool,
}

impl Participant {
    /// A teammate participant.
    pub fn teammate(teammate_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            teammate_id: Some(teammate_id),
            name: name.into(),
            is_player: false,
        }
    }

    /// The player participant.
    pub fn player() -> Self {
        Self {
            teammate_id: None,
            name: "You".to_string(),
            is_player: true,
        }
    }
}

/// A scheduled or running meeting with its participant set.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Meeting type tag (e.g., "standup", "planning").
    pub meeting_type: String,
    /// What the meeting is about.
    pub topic: String,
    /// In-game day the meeting is scheduled for.
    pub scheduled_day: u32,
    /// Lifecycle status.
    pub status: MeetingStatus,
    /// Free-text notes recorded at completion.
    pub notes: Option<String>,
    /// When the meeting was created.
    pub created_at: DateTime<Utc>,
    /// When the meeting completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Attendees. Add-only; duplicates are ignored.
    pub participants: Vec<Participant>,
}

impl Meeting {
    /// Create a new scheduled meeting with no participants.
    pub fn new(
        project_id: Uuid,
        meeting_type: impl Into<String>,
        topic: impl Into<String>,
        scheduled_day: u32,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            meeting_type: meeting_type.into(),
            topic: topic.into(),
            scheduled_day,
            status: MeetingStatus::Scheduled,
            notes: None,
            created_at: Utc::now(),
            completed_at: None,
            participants: Vec::new(),
        }
    }

    /// Add a participant. Inserting the same teammate (or the player)
    /// twice is a no-op.
    pub fn add_participant(&mut self, participant: Participant) {
        let duplicate = self.participants.iter().any(|p| {
            p.is_player == participant.is_player && p.teammate_id == participant.teammate_id
        });
        if !duplicate {
            self.participants.push(participant);
        }
    }

    /// Move the meeting into progress.
    pub fn start(&mut self) {
        self.status = MeetingStatus::InProgress;
    }

    /// Complete the meeting, recording notes and the completion time.
    pub fn complete(&mut self, notes: impl Into<String>) {
        self.status = MeetingStatus::Completed;
        self.notes = Some(notes.into());
        self.completed_at = Some(Utc::now());
    }
}

/// Decide which non-player participant speaks next.
///
/// A participant whose display name occurs in the message as a
/// case-insensitive substring speaks next (first match in list order
/// wins). Otherwise one non-player participant is picked uniformly at
/// random. Returns `None` when there are no non-player participants;
/// the caller treats that as "nothing to add."
///
/// Deliberately simple; a placeholder for weighted or relevance-based
/// selection.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use venture_core::meeting::{next_speaker, Participant};
///
/// let participants = vec![
///     Participant::teammate(Uuid::now_v7(), "Alex"),
///     Participant::teammate(Uuid::now_v7(), "Sam"),
/// ];
///
/// let speaker = next_speaker(&participants, "Hey Sam, thoughts?").unwrap();
/// assert_eq!(speaker.name, "Sam");
/// ```
pub fn next_speaker<'a>(
    participants: &'a [Participant],
    last_message: &str,
) -> Option<&'a Participant> {
    let candidates: Vec<&Participant> = participants.iter().filter(|p| !p.is_player).collect();

    if candidates.is_empty() {
        return None;
    }

    let message = last_message.to_lowercase();
    for participant in candidates.iter().copied() {
        if message.contains(&participant.name.to_lowercase()) {
            return Some(participant);
        }
    }

    candidates.choose(&mut rand::thread_rng()).copied()
}
