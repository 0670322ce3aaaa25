//! Teammate types.
//!
//! Provides the [`TeammateRole`] enum and the [`Teammate`] struct
//! describing an AI persona bound to one project.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Role of a teammate on the project.
///
/// The six known roles drive prompt and temperature selection; anything
/// else (including roles produced by upstream generation) lands in
/// [`Custom`](TeammateRole::Custom) carrying the original text, so role
/// dispatch stays exhaustive without rejecting new role strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeammateRole {
    /// Coordinates the team; exactly one per project by convention.
    ProjectManager,
    /// Frontend developer.
    FrontendDeveloper,
    /// Backend developer.
    BackendDeveloper,
    /// Designer.
    Designer,
    /// DevOps engineer.
    Devops,
    /// QA engineer.
    QaEngineer,
    /// A free-text role outside the known set.
    Custom(String),
}

impl TeammateRole {
    /// Parse a role string, normalizing case and whitespace.
    ///
    /// Unrecognized strings become [`Custom`](TeammateRole::Custom)
    /// with the original text preserved.
    pub fn parse(role: &str) -> Self {
        match role.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "project_manager" => Self::ProjectManager,
            "frontend_developer" => Self::FrontendDeveloper,
            "backend_developer" => Self::BackendDeveloper,
            "designer" => Self::Designer,
            "devops" | "devops_engineer" => Self::Devops,
            "qa_engineer" => Self::QaEngineer,
            _ => Self::Custom(role.trim().to_string()),
        }
    }

    /// Canonical storage identifier for this role.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ProjectManager => "project_manager",
            Self::FrontendDeveloper => "frontend_developer",
            Self::BackendDeveloper => "backend_developer",
            Self::Designer => "designer",
            Self::Devops => "devops",
            Self::QaEngineer => "qa_engineer",
            Self::Custom(role) => role,
        }
    }

    /// Sampling temperature for this role.
    ///
    /// Creative roles run warmer; verification-heavy roles run cooler.
    /// Custom roles get the 0.7 default.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::ProjectManager => 0.7,
            Self::Designer => 0.8,
            Self::FrontendDeveloper => 0.6,
            Self::BackendDeveloper => 0.5,
            Self::Devops => 0.5,
            Self::QaEngineer => 0.4,
            Self::Custom(_) => 0.7,
        }
    }
}

impl std::fmt::Display for TeammateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An AI-driven teammate persona.
///
/// Created once at setup/finalize time. The model assignment is the
/// only field mutated afterwards (via settings).
#[derive(Debug, Clone, PartialEq)]
pub struct Teammate {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Display name.
    pub name: String,
    /// Role on the team.
    pub role: TeammateRole,
    /// Short description of this teammate's specialty.
    pub specialty: String,
    /// LLM provider identifier (e.g., "anthropic").
    pub provider: String,
    /// Human-facing model version (e.g., "claude-sonnet-4.5").
    pub model_version: String,
    /// Personality-trait strings shown in the persona prompt.
    pub personality_traits: Vec<String>,
    /// Desk position on the office canvas (x, y).
    pub desk_position: (i32, i32),
    /// When the teammate was created.
    pub created_at: DateTime<Utc>,
}

impl Teammate {
    /// Create a new teammate.
    pub fn new(
        project_id: Uuid,
        name: impl Into<String>,
        role: TeammateRole,
        provider: impl Into<String>,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            name: name.into(),
            role,
            specialty: String::new(),
            provider: provider.into(),
            model_version: model_version.into(),
            personality_traits: Vec::new(),
            desk_position: (0, 0),
            created_at: Utc::now(),
        }
    }

    /// Set the specialty text.
    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    /// Set the personality traits.
    #[must_use]
    pub fn with_traits(mut self, traits: Vec<String>) -> Self {
        self.personality_traits = traits;
        self
    }

    /// Set the desk position.
    #[must_use]
    pub fn with_desk_position(mut self, x: i32, y: i32) -> Self {
        self.desk_position = (x, y);
        self
    }

    /// Reassign the model provider and version.
    pub fn assign_model(&mut self, provider: impl Into<String>, model_version: impl Into<String>) {
        self.provider = provider.into();
        self.model_version = model_version.into();
    }

    /// The default project manager seeded when a project has none yet.
    pub fn default_pm(project_id: Uuid) -> Self {
        Self::new(
            project_id,
            "Alex",
            TeammateRole::ProjectManager,
            "anthropic",
            "claude-sonnet-4.5",
        )
        .with_specialty("Agile project management")
        .with_traits(vec![
            "Organized".to_string(),
            "Strategic".to_string(),
            "Collaborative".to_string(),
        ])
        .with_desk_position(100, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(
            TeammateRole::parse("project_manager"),
            TeammateRole::ProjectManager
        );
        assert_eq!(TeammateRole::parse("designer"), TeammateRole::Designer);
        assert_eq!(TeammateRole::parse("qa_engineer"), TeammateRole::QaEngineer);
    }

    #[test]
    fn test_parse_normalizes_case_and_spaces() {
        assert_eq!(
            TeammateRole::parse("Project Manager"),
            TeammateRole::ProjectManager
        );
        assert_eq!(
            TeammateRole::parse("Backend-Developer"),
            TeammateRole::BackendDeveloper
        );
        assert_eq!(
            TeammateRole::parse("DevOps Engineer"),
            TeammateRole::Devops
        );
    }

    #[test]
    fn test_parse_unknown_preserves_text() {
        let role = TeammateRole::parse("Growth Hacker");
        assert_eq!(role, TeammateRole::Custom("Growth Hacker".to_string()));
        assert_eq!(role.as_str(), "Growth Hacker");
    }

    #[test]
    fn test_temperature_table() {
        assert_eq!(TeammateRole::ProjectManager.temperature(), 0.7);
        assert_eq!(TeammateRole::Designer.temperature(), 0.8);
        assert_eq!(TeammateRole::FrontendDeveloper.temperature(), 0.6);
        assert_eq!(TeammateRole::BackendDeveloper.temperature(), 0.5);
        assert_eq!(TeammateRole::Devops.temperature(), 0.5);
        assert_eq!(TeammateRole::QaEngineer.temperature(), 0.4);
        assert_eq!(
            TeammateRole::Custom("intern".to_string()).temperature(),
            0.7
        );
    }

    #[test]
    fn test_teammate_builder() {
        let project_id = Uuid::now_v7();
        let teammate = Teammate::new(
            project_id,
            "Sam",
            TeammateRole::Designer,
            "google",
            "gemini-3.0",
        )
        .with_specialty("Interaction design")
        .with_traits(vec!["Creative".to_string()])
        .with_desk_position(320, 300);

        assert_eq!(teammate.project_id, project_id);
        assert_eq!(teammate.name, "Sam");
        assert_eq!(teammate.specialty, "Interaction design");
        assert_eq!(teammate.desk_position, (320, 300));
        assert!(!teammate.id.is_nil());
    }

    #[test]
    fn test_assign_model() {
        let mut teammate = Teammate::new(
            Uuid::now_v7(),
            "Sam",
            TeammateRole::Designer,
            "google",
            "gemini-3.0",
        );
        teammate.assign_model("openai", "gpt-5.1");
        assert_eq!(teammate.provider, "openai");
        assert_eq!(teammate.model_version, "gpt-5.1");
    }

    #[test]
    fn test_default_pm() {
        let project_id = Uuid::now_v7();
        let pm = Teammate::default_pm(project_id);

        assert_eq!(pm.name, "Alex");
        assert_eq!(pm.role, TeammateRole::ProjectManager);
        assert_eq!(pm.provider, "anthropic");
        assert_eq!(pm.personality_traits.len(), 3);
    }
}
