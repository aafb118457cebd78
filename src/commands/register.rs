use crate::cli::RegisterArgs;
use crate::commands::{emit, CommandError};
use crate::core::display::{render_registration, truncate};
use crate::core::input::{is_valid_email, non_empty, parse_list};
use crate::models::{ExpertiseLevel, RegisterAgentRequest};
use crate::services::AgentApiClient;
use dialoguer::{Confirm, Input, Select};
use std::io::Write;
use validator::Validate;

/// Answer taken when Enter is pressed at the final confirmation; only an explicit yes registers
const PROCEED_BY_DEFAULT: bool = false;

/// Register an agent from flags, or by prompting when `--interactive` is set
pub async fn run<W: Write>(
    client: &AgentApiClient,
    args: RegisterArgs,
    out: &mut W,
) -> Result<(), CommandError> {
    let request = if args.interactive {
        match prompt_registration(out)? {
            Some(request) => request,
            None => {
                writeln!(out, "❌ Registration cancelled.")?;
                return Ok(());
            }
        }
    } else {
        build_request(&args)?
    };

    request.validate()?;

    let agent = client.register_agent(&request).await?;
    tracing::info!("Registered agent {:?}", agent.data.id);
    emit(out, args.json, &agent.body, || render_registration(&agent.data))
}

/// Build the registration payload from command-line flags
pub fn build_request(args: &RegisterArgs) -> Result<RegisterAgentRequest, CommandError> {
    let (Some(name), Some(email)) = (non_empty(args.name.clone()), non_empty(args.email.clone()))
    else {
        return Err(CommandError::Validation(
            "--name and --email are required (or use --interactive)".to_string(),
        ));
    };

    Ok(RegisterAgentRequest {
        agent_name: name,
        teamily_id: email,
        bio: non_empty(args.bio.clone()),
        avatar_url: non_empty(args.avatar.clone()),
        location: non_empty(args.location.clone()),
        language: non_empty(args.language.clone()),
        skills: parse_list(args.skills.as_deref()).unwrap_or_default(),
        interests: parse_list(args.interests.as_deref()).unwrap_or_default(),
        tags: parse_list(args.tags.as_deref()).unwrap_or_default(),
        expertise_level: args.expertise,
        looking_for: non_empty(args.looking_for.clone()),
        preferred_tags: parse_list(args.preferred_tags.as_deref()).unwrap_or_default(),
        preferred_skills: parse_list(args.preferred_skills.as_deref()).unwrap_or_default(),
    })
}

/// Ask for the profile on the terminal; `None` if the user declines at the end
fn prompt_registration<W: Write>(out: &mut W) -> Result<Option<RegisterAgentRequest>, CommandError> {
    writeln!(out, "🤖 Agent Social Matching - Interactive Registration")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out)?;
    writeln!(out, "📝 Required Information:")?;
    out.flush()?;

    let agent_name: String = Input::new()
        .with_prompt("  Agent Name (display name)")
        .validate_with(|input: &String| -> Result<(), &str> {
            match input.trim().chars().count() {
                0 => Err("Agent name is required"),
                1..=100 => Ok(()),
                _ => Err("Agent name must be at most 100 characters"),
            }
        })
        .interact_text()?;

    let teamily_id: String = Input::new()
        .with_prompt("  Email Address")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_email(input.trim()) {
                Ok(())
            } else {
                Err("Invalid email format")
            }
        })
        .interact_text()?;

    writeln!(out)?;
    writeln!(out, "📋 Optional Information (press Enter to skip):")?;
    out.flush()?;

    let bio = optional_input("  Personal Bio")?;
    let location = optional_input("  Location (e.g., San Francisco, CA)")?;
    let language = optional_input("  Primary Language (e.g., English)")?;
    let skills = optional_input("  Skills (comma-separated, e.g., Python,ML,Web Dev)")?;
    let interests = optional_input("  Interests (comma-separated, e.g., AI,Open Source)")?;
    let tags = optional_input("  Tags (comma-separated, e.g., developer,researcher)")?;

    let mut levels = vec!["skip"];
    levels.extend(ExpertiseLevel::ALL.iter().map(ExpertiseLevel::as_str));
    let choice = Select::new()
        .with_prompt("  Expertise Level")
        .items(&levels)
        .default(0)
        .interact()?;
    let expertise_level = choice.checked_sub(1).map(|i| ExpertiseLevel::ALL[i]);

    let looking_for = optional_input("  What are you looking for? (e.g., collaboration, learning)")?;
    let avatar_url = optional_input("  Avatar URL (optional)")?;

    let request = RegisterAgentRequest {
        agent_name: agent_name.trim().to_string(),
        teamily_id: teamily_id.trim().to_string(),
        bio,
        avatar_url,
        location,
        language,
        skills: parse_list(skills.as_deref()).unwrap_or_default(),
        interests: parse_list(interests.as_deref()).unwrap_or_default(),
        tags: parse_list(tags.as_deref()).unwrap_or_default(),
        expertise_level,
        looking_for,
        preferred_tags: Vec::new(),
        preferred_skills: Vec::new(),
    };

    writeln!(out)?;
    writeln!(out, "{}", confirmation_summary(&request))?;
    out.flush()?;

    let proceed = Confirm::new()
        .with_prompt("✅ Proceed with registration?")
        .default(PROCEED_BY_DEFAULT)
        .interact()?;

    Ok(proceed.then_some(request))
}

fn optional_input(prompt: &str) -> Result<Option<String>, CommandError> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(non_empty(Some(value.trim().to_string())))
}

/// Summary shown before the interactive registration is sent
pub fn confirmation_summary(request: &RegisterAgentRequest) -> String {
    let mut lines = vec![
        "🔍 Confirming registration...".to_string(),
        format!("  Name: {}", request.agent_name),
        format!("  Email: {}", request.teamily_id),
    ];
    if let Some(bio) = &request.bio {
        lines.push(format!("  Bio: {}", truncate(bio, 50)));
    }
    if !request.skills.is_empty() {
        lines.push(format!("  Skills: {}", request.skills.join(", ")));
    }
    if !request.interests.is_empty() {
        lines.push(format!("  Interests: {}", request.interests.join(", ")));
    }
    if let Some(level) = request.expertise_level {
        lines.push(format!("  Expertise: {}", level));
    }
    lines.join("\n")
}
