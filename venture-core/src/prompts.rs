//! Game prompt templates and reply parsing.
//!
//! The game-flow layer drives the daily cycle by feeding these prompts
//! to [`Bot::generate`](crate::bot::Bot::generate) and parsing the
//! structured parts of the replies. List-shaped replies are requested
//! as JSON and extracted with [`extract_json_array`].

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Prompt for the PM's morning status overview.
pub fn daily_overview(day: u32) -> String {
    format!(
        "Generate a brief project status overview for Day {day}. \
         Include: current progress, key achievements from yesterday, and what's planned \
         for today. Keep it concise (3-4 sentences)."
    )
}

/// Prompt asking one teammate for a standup update.
pub fn standup_update() -> &'static str {
    "Give a brief standup update (1-2 sentences) about what you're working on."
}

/// Prompt for the PM to turn standup notes into a task list.
pub fn task_generation(standup_notes: &str) -> String {
    format!(
        "Based on the standup updates:\n{standup_notes}\n\n\
         Generate 2-4 specific tasks for today. For each task, provide: \
         title, description, priority (low/medium/high), and recommended teammate role. \
         Format as JSON: \
         [{{\"title\": \"...\", \"description\": \"...\", \"priority\": \"...\", \"role\": \"...\"}}]"
    )
}

/// Prompt for the PM to propose a team roster at setup finalize.
pub fn team_roster(project_description: &str) -> String {
    format!(
        "Based on our conversation about building '{project_description}', \
         generate a list of 3-5 teammates we need for this project. \
         For each teammate, provide: role, specialty, and a brief personality description. \
         Format as JSON: [{{\"role\": \"...\", \"specialty\": \"...\", \"personality\": \"...\"}}]"
    )
}

/// Prompt for the PM's end-of-day wrap-up.
pub fn end_of_day_summary(tasks_completed: usize) -> String {
    format!(
        "Provide a brief end-of-day summary. We completed {tasks_completed} tasks today. \
         Highlight what went well and what's next. Keep it motivational and concise \
         (2-3 sentences)."
    )
}

/// Wrap the latest meeting message with the meeting topic so the
/// responding bot knows the setting.
pub fn meeting_message(topic: &str, latest_message: &str) -> String {
    format!("In a meeting about: {topic}\n\nLatest message: {latest_message}")
}

/// A task proposed by the PM during standup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskSuggestion {
    /// Task title.
    #[serde(default = "untitled")]
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Priority: low, medium, or high.
    #[serde(default = "medium_priority")]
    pub priority: String,
    /// Recommended teammate role for the assignment.
    #[serde(default)]
    pub role: String,
}

/// A teammate proposed by the PM at setup finalize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeammateSuggestion {
    /// Role name, free text; normalized via
    /// [`TeammateRole::parse`](crate::team::TeammateRole::parse).
    #[serde(default)]
    pub role: String,
    /// Specialty description.
    #[serde(default)]
    pub specialty: String,
    /// One-line personality description.
    #[serde(default = "default_personality")]
    pub personality: String,
}

fn untitled() -> String {
    "Untitled Task".to_string()
}

fn medium_priority() -> String {
    "medium".to_string()
}

fn default_personality() -> String {
    "Helpful and professional".to_string()
}

/// Extract the first JSON array embedded in a model reply.
///
/// Models wrap JSON in prose or code fences more often than not; this
/// takes everything between the first `[` and the last `]` and parses
/// it. Returns an empty vec when no parseable array is present;
/// callers treat that as "the model produced nothing usable," not an
/// error.
pub fn extract_json_array<T: DeserializeOwned>(reply: &str) -> Vec<T> {
    let Some(start) = reply.find('[') else {
        return Vec::new();
    };
    let Some(end) = reply.rfind(']') else {
        return Vec::new();
    };
    if end < start {
        return Vec::new();
    }

    serde_json::from_str(&reply[start..=end]).unwrap_or_default()
}
