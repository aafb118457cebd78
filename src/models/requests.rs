use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};
use crate::core::input::is_valid_email;
use crate::models::domain::{AgentId, ExpertiseLevel};

/// Request to register a new agent
///
/// Only `agent_name` and `teamily_id` are required; everything else is
/// omitted from the payload when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterAgentRequest {
    #[validate(length(min = 1, max = 100, message = "agent_name must be 1-100 characters"))]
    pub agent_name: String,
    #[validate(custom(function = "validate_email_shape"))]
    pub teamily_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise_level: Option<ExpertiseLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looking_for: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_skills: Vec<String>,
}

/// Sparse update for an existing agent; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateAgentRequest {
    #[validate(length(min = 1, max = 100, message = "agent_name must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise_level: Option<ExpertiseLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looking_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_enabled: Option<bool>,
}

impl UpdateAgentRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Query string for `GET /agents`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ListAgentsParams {
    #[validate(range(min = 0, message = "--skip must not be negative"))]
    pub skip: i64,
    #[validate(range(min = 1, max = 1000, message = "--limit must be between 1 and 1000"))]
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl Default for ListAgentsParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            is_active: None,
            is_public: None,
        }
    }
}

/// Request to search for matching agents
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    pub requester_id: AgentId,
    #[validate(custom(function = "validate_min_score"))]
    pub min_score: f64,
    #[validate(range(min = 1, max = 100, message = "--limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<SearchQuery>,
}

/// Criteria a match should share with the requester
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SearchQuery {
    /// `None` when no criterion is set, so the payload omits `query` entirely
    pub fn non_empty(self) -> Option<Self> {
        if self == Self::default() {
            None
        } else {
            Some(self)
        }
    }
}

fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        return Ok(());
    }
    let mut error = ValidationError::new("email");
    error.message = Some(format!("Invalid email format: {}", email).into());
    Err(error)
}

fn validate_min_score(score: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&score) {
        return Ok(());
    }
    let mut error = ValidationError::new("range");
    error.message = Some("--min-score must be between 0 and 1".into());
    Err(error)
}

/// Flatten validation errors into one line, fields in name order
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, e.code),
                })
                .collect();
            (field, messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, messages)| messages)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register(name: &str, email: &str) -> RegisterAgentRequest {
        RegisterAgentRequest {
            agent_name: name.to_string(),
            teamily_id: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let errors = register("Ada", "not-an-email").validate().unwrap_err();
        assert_eq!(
            describe_validation_errors(&errors),
            "Invalid email format: not-an-email"
        );
    }

    #[test]
    fn test_register_rejects_name_length() {
        assert!(register("", "ada@example.com").validate().is_err());
        assert!(register(&"x".repeat(101), "ada@example.com").validate().is_err());
        assert!(register(&"x".repeat(100), "ada@example.com").validate().is_ok());
    }

    #[test]
    fn test_register_payload_omits_empty_fields() {
        let mut request = register("Ada", "ada@example.com");
        request.skills = vec!["Rust".to_string()];
        request.expertise_level = Some(ExpertiseLevel::Expert);

        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(
            payload,
            json!({
                "agent_name": "Ada",
                "teamily_id": "ada@example.com",
                "skills": ["Rust"],
                "expertise_level": "expert"
            })
        );
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateAgentRequest::default().is_empty());
        let update = UpdateAgentRequest {
            is_public: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"is_public": false}));
    }

    #[test]
    fn test_search_bounds() {
        let mut request = SearchRequest {
            requester_id: 1,
            min_score: 0.3,
            limit: 10,
            query: None,
        };
        assert!(request.validate().is_ok());

        request.min_score = 1.5;
        assert!(request.validate().is_err());

        request.min_score = f64::NAN;
        assert!(request.validate().is_err());

        request.min_score = 0.0;
        request.limit = 0;
        let errors = request.validate().unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "--limit must be between 1 and 100");
    }

    #[test]
    fn test_negative_search_values_fail_validation() {
        let mut request = SearchRequest {
            requester_id: 1,
            min_score: -0.5,
            limit: 10,
            query: None,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "--min-score must be between 0 and 1");

        request.min_score = 0.5;
        request.limit = -3;
        let errors = request.validate().unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "--limit must be between 1 and 100");
    }

    #[test]
    fn test_list_params_bounds() {
        assert!(ListAgentsParams::default().validate().is_ok());

        let params = ListAgentsParams {
            limit: -1,
            ..Default::default()
        };
        let errors = params.validate().unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "--limit must be between 1 and 1000");

        let params = ListAgentsParams {
            skip: -5,
            ..Default::default()
        };
        let errors = params.validate().unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "--skip must not be negative");
    }

    #[test]
    fn test_empty_search_query_is_dropped() {
        assert_eq!(SearchQuery::default().non_empty(), None);
        let query = SearchQuery {
            language: Some("English".to_string()),
            ..Default::default()
        };
        assert!(query.non_empty().is_some());
    }
}
