use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Numeric identifier assigned to an agent by the service
pub type AgentId = u64;

/// Agent profile as returned by the matching service
///
/// Every field is optional on the wire; the service owns the record and the
/// client only reads it for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agent {
    #[serde(default)]
    pub id: Option<AgentId>,
    #[serde(default)]
    pub agent_name: Option<String>,
    /// Contact email, used by the service as the agent's external identifier
    #[serde(default)]
    pub teamily_id: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub expertise_level: Option<String>,
    #[serde(default)]
    pub looking_for: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub preferred_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub matching_enabled: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Agent {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }

    pub fn public(&self) -> bool {
        self.is_public.unwrap_or(false)
    }

    pub fn matching(&self) -> bool {
        self.matching_enabled.unwrap_or(false)
    }
}

/// Self-assessed expertise of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExpertiseLevel {
    pub const ALL: [ExpertiseLevel; 4] = [
        ExpertiseLevel::Beginner,
        ExpertiseLevel::Intermediate,
        ExpertiseLevel::Advanced,
        ExpertiseLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertiseLevel::Beginner => "beginner",
            ExpertiseLevel::Intermediate => "intermediate",
            ExpertiseLevel::Advanced => "advanced",
            ExpertiseLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate returned by a match search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentMatch {
    #[serde(default)]
    pub agent_id: Option<AgentId>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Compatibility score in [0, 1], computed by the service
    #[serde(default, deserialize_with = "null_as_zero")]
    pub match_score: f64,
    #[serde(default)]
    pub score_details: Option<ScoreDetails>,
}

/// Per-category contribution to a match score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreDetails {
    #[serde(default)]
    pub tags_score: Option<f64>,
    #[serde(default)]
    pub skills_score: Option<f64>,
    #[serde(default)]
    pub interests_score: Option<f64>,
}

impl ScoreDetails {
    /// Available categories in display order
    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        [
            ("tags", self.tags_score),
            ("skills", self.skills_score),
            ("interests", self.interests_score),
        ]
        .into_iter()
        .filter_map(|(name, score)| score.map(|s| (name, s)))
        .collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
