//! Human-readable rendering of service responses
//!
//! Every function returns the full text block; callers decide where it goes.

use chrono::{DateTime, NaiveDateTime, Utc};
use crate::models::{Agent, AgentList, AgentMatch, ProbeOutcome, ProbeReport, SearchResponse};

const WIDE: usize = 70;
const NARROW: usize = 60;
const SCORE_BAR_CELLS: usize = 20;

/// Score at or above which a match counts as high compatibility
pub const HIGH_MATCH: f64 = 0.7;
/// Score at or above which a match counts as medium compatibility
pub const MEDIUM_MATCH: f64 = 0.5;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Cut `text` to `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Twenty-cell bar, one filled cell per 0.05 of score
pub fn score_bar(score: f64) -> String {
    let filled = (score * SCORE_BAR_CELLS as f64)
        .floor()
        .clamp(0.0, SCORE_BAR_CELLS as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(SCORE_BAR_CELLS - filled))
}

/// Render a service timestamp as `YYYY-MM-DD HH:MM:SS UTC`, or verbatim if unparseable
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }
    // Naive timestamps from the service are UTC
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.and_utc().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }
    raw.to_string()
}

/// Full profile view for a single agent
pub fn render_agent(agent: &Agent) -> String {
    let name = agent.agent_name.as_deref().unwrap_or("Unknown");
    let mut lines = vec![
        String::new(),
        rule(WIDE),
        format!("🤖 Agent Profile: {}", name),
        rule(WIDE),
        String::new(),
        format!("  ID: {}", or_dash(agent.id)),
        format!("  Name: {}", or_dash(agent.agent_name.as_deref())),
        format!("  Email: {}", or_dash(agent.teamily_id.as_deref())),
        String::new(),
        format!("  Status: {}", if agent.active() { "🟢 Active" } else { "🔴 Inactive" }),
        format!("  Visibility: {}", if agent.public() { "👁️  Public" } else { "🔒 Private" }),
        format!("  Matching: {}", if agent.matching() { "✅ Enabled" } else { "❌ Disabled" }),
        String::new(),
    ];

    if let Some(bio) = present(&agent.bio) {
        lines.push(format!("  📝 Bio: {}", bio));
        lines.push(String::new());
    }

    if let Some(location) = present(&agent.location) {
        lines.push(format!("  📍 Location: {}", location));
    }
    if let Some(language) = present(&agent.language) {
        lines.push(format!("  🗣️  Language: {}", language));
    }
    if let Some(expertise) = present(&agent.expertise_level) {
        lines.push(format!("  🎓 Expertise: {}", expertise));
    }
    lines.push(String::new());

    push_list(&mut lines, "  💼 Skills", &agent.skills);
    push_list(&mut lines, "  ❤️  Interests", &agent.interests);
    push_list(&mut lines, "  🏷️  Tags", &agent.tags);
    lines.push(String::new());

    if let Some(looking_for) = present(&agent.looking_for) {
        lines.push(format!("  🎯 Looking for: {}", looking_for));
    }
    push_list(&mut lines, "  ⚡ Preferred Skills", &agent.preferred_skills);
    push_list(&mut lines, "  ⭐ Preferred Tags", &agent.preferred_tags);
    lines.push(String::new());

    if let Some(created) = present(&agent.created_at) {
        lines.push(format!("  📅 Created: {}", format_timestamp(created)));
    }
    if let Some(updated) = present(&agent.updated_at) {
        lines.push(format!("  🔄 Updated: {}", format_timestamp(updated)));
    }

    lines.push(String::new());
    lines.push(rule(WIDE));
    lines.push(String::new());
    lines.join("\n")
}

/// One-entry-per-agent listing with pagination total
pub fn render_agent_list(list: &AgentList) -> String {
    let mut lines = vec![
        String::new(),
        rule(WIDE),
        format!("📋 Agent List: {} of {} total", list.items.len(), list.total),
        rule(WIDE),
    ];

    for agent in &list.items {
        let status = if agent.active() { "🟢" } else { "🔴" };
        let visibility = if agent.public() { "👁️" } else { "🔒" };
        lines.push(String::new());
        lines.push(format!(
            "  {} {} [{}] {}",
            status,
            visibility,
            or_dash(agent.id),
            or_dash(agent.agent_name.as_deref())
        ));
        lines.push(format!("      Email: {}", or_dash(agent.teamily_id.as_deref())));
        if let Some(bio) = present(&agent.bio) {
            lines.push(format!("      Bio: {}", truncate(bio, 60)));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Confirmation shown after a successful registration
pub fn render_registration(agent: &Agent) -> String {
    let id = or_dash(agent.id);
    let lines = vec![
        String::new(),
        rule(NARROW),
        "✅ Registration Successful!".to_string(),
        rule(NARROW),
        format!("Agent ID: {}", id),
        format!("Name: {}", or_dash(agent.agent_name.as_deref())),
        format!("Email: {}", or_dash(agent.teamily_id.as_deref())),
        format!("Status: {}", if agent.active() { "Active" } else { "Inactive" }),
        format!("Public: {}", if agent.public() { "Yes" } else { "No" }),
        String::new(),
        "🎉 Your agent profile has been created!".to_string(),
        String::new(),
        "Next steps:".to_string(),
        "  • Search for matching agents:".to_string(),
        format!("    agent-social search --requester-id {}", id),
        "  • Update your profile:".to_string(),
        format!("    agent-social update --agent-id {} --bio 'New bio'", id),
        "  • View your profile:".to_string(),
        format!("    agent-social get --agent-id {}", id),
        String::new(),
    ];
    lines.join("\n")
}

/// Confirmation shown after a successful update
pub fn render_update(agent: &Agent) -> String {
    [
        rule(NARROW),
        "✅ Agent Updated Successfully!".to_string(),
        rule(NARROW),
        render_agent(agent),
    ]
    .join("\n")
}

/// Format a single ranked match
pub fn format_match(agent_match: &AgentMatch, rank: usize) -> String {
    let score = agent_match.match_score;
    let bio = agent_match.bio.as_deref().unwrap_or("No bio provided");

    let mut lines = vec![
        format!(
            "\n{}. 🌟 {} (ID: {})",
            rank,
            agent_match.agent_name.as_deref().unwrap_or("Unknown"),
            or_dash(agent_match.agent_id)
        ),
        format!("   Match Score: {:.2} [{}]", score, score_bar(score)),
        format!("   📍 Location: {}", agent_match.location.as_deref().unwrap_or("N/A")),
        format!("   📝 Bio: {}", truncate(bio, 80)),
    ];

    if !agent_match.skills.is_empty() {
        lines.push(format!("   💼 Skills: {}", first_five(&agent_match.skills)));
    }
    if !agent_match.tags.is_empty() {
        lines.push(format!("   🏷️  Tags: {}", first_five(&agent_match.tags)));
    }

    if let Some(details) = &agent_match.score_details {
        let breakdown: Vec<String> = details
            .breakdown()
            .into_iter()
            .map(|(name, value)| format!("{}={:.2}", name, value))
            .collect();
        if !breakdown.is_empty() {
            lines.push(format!("   📊 Score Breakdown: {}", breakdown.join(", ")));
        }
    }

    lines.join("\n")
}

/// Ranked search results with a compatibility summary
pub fn render_search_results(results: &SearchResponse) -> String {
    let mut lines = vec![
        String::new(),
        rule(WIDE),
        format!("🔍 Search Results: Found {} Matching Agents", results.total),
        rule(WIDE),
    ];

    if results.matches.is_empty() {
        lines.extend(
            [
                "\n❌ No matches found.",
                "\nTips:",
                "  • Try lowering the --min-score threshold",
                "  • Broaden your search criteria",
                "  • Check if your profile is complete and public",
            ]
            .map(String::from),
        );
        lines.push(String::new());
        return lines.join("\n");
    }

    for (index, agent_match) in results.matches.iter().enumerate() {
        lines.push(format_match(agent_match, index + 1));
    }

    let high: Vec<&AgentMatch> = results
        .matches
        .iter()
        .filter(|m| m.match_score >= HIGH_MATCH)
        .collect();
    let medium = results
        .matches
        .iter()
        .filter(|m| m.match_score >= MEDIUM_MATCH && m.match_score < HIGH_MATCH)
        .count();

    lines.push(String::new());
    lines.push(rule(WIDE));
    lines.push("📋 Summary & Recommendations".to_string());
    lines.push(rule(WIDE));
    lines.push(format!("\n  • High compatibility (≥0.7): {} agents", high.len()));
    lines.push(format!("  • Medium compatibility (0.5-0.7): {} agents", medium));

    if let Some(top) = high.first() {
        lines.push("\n  ✅ Recommended: Reach out to agents with 0.7+ match scores".to_string());
        lines.push(format!(
            "     Top match: {} ({:.2})",
            top.agent_name.as_deref().unwrap_or("Unknown"),
            top.match_score
        ));
    }

    lines.extend(
        [
            "\n  💡 Next steps:",
            "     • Review agent profiles in detail",
            "     • Consider complementary skills, not just similar ones",
            "     • Check if agents are actively looking for connections",
        ]
        .map(String::from),
    );
    lines.push(String::new());
    lines.join("\n")
}

/// Numbered connectivity report
pub fn render_probe_report(report: &ProbeReport) -> String {
    let mut lines = vec![
        "🔍 Testing Agent Social API Connection...".to_string(),
        rule(NARROW),
        format!("API URL: {}", report.api_url),
        format!("API Version: {}", report.api_version),
        rule(NARROW),
        String::new(),
    ];

    for (index, check) in report.checks.iter().enumerate() {
        lines.push(format!("{}. Testing {}...", index + 1, check.name));
        match &check.outcome {
            ProbeOutcome::Ok { summary, details } => {
                lines.push(format!("   ✅ {} OK{}", check.label, summary_suffix(summary)));
                for (key, value) in details {
                    lines.push(format!("      {}: {}", key, value));
                }
            }
            ProbeOutcome::UnexpectedStatus { status } => {
                lines.push(format!("   ⚠️  {} returned status {}", check.label, status));
            }
            ProbeOutcome::Failed { error } => {
                lines.push(format!("   ❌ {} failed: {}", check.label, error));
            }
        }
        lines.push(String::new());
    }

    lines.push(rule(NARROW));
    lines.push(if report.all_ok() {
        "🎉 Connection test complete!".to_string()
    } else {
        "⚠️  Connection test complete with problems".to_string()
    });
    lines.push(String::new());
    lines.push("Next steps:".to_string());
    lines.push("  • Register an agent: agent-social register --interactive".to_string());
    lines.push("  • List agents: agent-social get --list".to_string());
    lines.push(String::new());
    lines.join("\n")
}

fn summary_suffix(summary: &Option<String>) -> String {
    match summary {
        Some(text) if !text.is_empty() => format!(": {}", text),
        _ => String::new(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn push_list(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if !items.is_empty() {
        lines.push(format!("{}: {}", label, items.join(", ")));
    }
}

fn first_five(items: &[String]) -> String {
    items.iter().take(5).cloned().collect::<Vec<_>>().join(", ")
}
