use crate::cli::UpdateArgs;
use crate::commands::{emit, CommandError};
use crate::core::display::render_update;
use crate::core::input::{non_empty, parse_list};
use crate::models::UpdateAgentRequest;
use crate::services::AgentApiClient;
use std::io::Write;
use validator::Validate;

/// Send a sparse update for one agent
pub async fn run<W: Write>(
    client: &AgentApiClient,
    args: UpdateArgs,
    out: &mut W,
) -> Result<(), CommandError> {
    let request = build_request(&args);
    if request.is_empty() {
        return Err(CommandError::Validation(
            "No updates provided".to_string(),
        ));
    }
    request.validate()?;

    let agent = client.update_agent(args.agent_id, &request).await?;
    tracing::info!("Updated agent {}", args.agent_id);
    emit(out, args.json, &agent.body, || render_update(&agent.data))
}

/// Collect only the fields given on the command line
pub fn build_request(args: &UpdateArgs) -> UpdateAgentRequest {
    UpdateAgentRequest {
        agent_name: non_empty(args.name.clone()),
        bio: non_empty(args.bio.clone()),
        avatar_url: non_empty(args.avatar.clone()),
        location: non_empty(args.location.clone()),
        language: non_empty(args.language.clone()),
        skills: parse_list(args.skills.as_deref()),
        interests: parse_list(args.interests.as_deref()),
        tags: parse_list(args.tags.as_deref()),
        expertise_level: args.expertise,
        looking_for: non_empty(args.looking_for.clone()),
        preferred_tags: parse_list(args.preferred_tags.as_deref()),
        preferred_skills: parse_list(args.preferred_skills.as_deref()),
        is_active: args.is_active,
        is_public: args.is_public,
        matching_enabled: args.matching_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_request_is_sparse() {
        let args = UpdateArgs {
            agent_id: 123,
            skills: Some("Python,Go, Rust".to_string()),
            is_active: Some(true),
            matching_enabled: Some(false),
            ..Default::default()
        };
        let payload = serde_json::to_value(build_request(&args)).unwrap();
        assert_eq!(
            payload,
            json!({
                "skills": ["Python", "Go", "Rust"],
                "is_active": true,
                "matching_enabled": false
            })
        );
    }

    #[test]
    fn test_blank_values_do_not_count_as_updates() {
        let args = UpdateArgs {
            agent_id: 1,
            bio: Some("   ".to_string()),
            tags: Some(",".to_string()),
            ..Default::default()
        };
        assert!(build_request(&args).is_empty());
    }
}
