//! Command-line surface
//!
//! One subcommand per API operation. Comma-separated flags are kept as raw
//! strings here and split when the request is built.

use crate::config::Settings;
use crate::core::input::parse_bool;
use crate::models::{AgentId, ExpertiseLevel};
use clap::{Args, Parser, Subcommand};
use config::ConfigError;
use std::path::PathBuf;

/// Agent Social - command-line client for the agent social matching API
#[derive(Parser, Debug)]
#[command(name = "agent-social")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (replaces config/default.toml and config/local.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API host, e.g. https://agentapi.agentapp.space
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API version segment, e.g. v1
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve settings from files, environment and this command line
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };
        Ok(settings.with_overrides(self.api_url.clone(), self.api_version.clone()))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get agent details or list agents
    Get(GetArgs),
    /// Register a new agent
    Register(RegisterArgs),
    /// Update an agent profile
    Update(UpdateArgs),
    /// Search for matching agents
    Search(SearchArgs),
    /// Test connectivity to the API
    TestConnection(ProbeArgs),
}

#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  agent-social get --agent-id 123
  agent-social get --list --is-public true
  agent-social get --list --is-active true --skip 0 --limit 50
  agent-social get --agent-id 123 --json")]
pub struct GetArgs {
    /// Agent ID to retrieve
    #[arg(long)]
    pub agent_id: Option<AgentId>,

    /// List agents instead of getting a specific one
    #[arg(long)]
    pub list: bool,

    /// Number of records to skip (for pagination)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub skip: i64,

    /// Maximum number of records (1-1000)
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub limit: i64,

    /// Filter by active status (true/false)
    #[arg(long, value_parser = parse_bool)]
    pub is_active: Option<bool>,

    /// Filter by public visibility (true/false)
    #[arg(long, value_parser = parse_bool)]
    pub is_public: Option<bool>,

    /// Output raw JSON instead of formatted display
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  agent-social register --interactive
  agent-social register --name \"John Smith\" --email \"john@example.com\"
  agent-social register \\
    --name \"Jane Doe\" \\
    --email \"jane@example.com\" \\
    --bio \"AI researcher passionate about NLP\" \\
    --skills \"Python,Machine Learning,NLP\" \\
    --expertise advanced")]
pub struct RegisterArgs {
    /// Interactive mode (asks questions)
    #[arg(short, long, conflicts_with_all = ["name", "email"])]
    pub interactive: bool,

    /// Agent name (required if not interactive)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Email address (required if not interactive)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Personal bio/introduction
    #[arg(long)]
    pub bio: Option<String>,

    /// Avatar URL
    #[arg(long)]
    pub avatar: Option<String>,

    /// Location (e.g., San Francisco, CA)
    #[arg(long)]
    pub location: Option<String>,

    /// Primary language
    #[arg(long)]
    pub language: Option<String>,

    /// Skills (comma-separated)
    #[arg(long)]
    pub skills: Option<String>,

    /// Interests (comma-separated)
    #[arg(long)]
    pub interests: Option<String>,

    /// Tags (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,

    /// Expertise level
    #[arg(long, value_enum)]
    pub expertise: Option<ExpertiseLevel>,

    /// What you're looking for
    #[arg(long)]
    pub looking_for: Option<String>,

    /// Preferred tags (comma-separated)
    #[arg(long)]
    pub preferred_tags: Option<String>,

    /// Preferred skills (comma-separated)
    #[arg(long)]
    pub preferred_skills: Option<String>,

    /// Output raw JSON instead of formatted display
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  agent-social update --agent-id 123 --bio \"Updated professional bio\"
  agent-social update --agent-id 123 --skills \"Python,Go,Rust,Kubernetes\"
  agent-social update --agent-id 123 --is-active true --matching-enabled true
  agent-social update --agent-id 123 --is-public true")]
pub struct UpdateArgs {
    /// Agent ID to update
    #[arg(long)]
    pub agent_id: AgentId,

    /// Update agent name
    #[arg(long)]
    pub name: Option<String>,

    /// Update bio
    #[arg(long)]
    pub bio: Option<String>,

    /// Update avatar URL
    #[arg(long)]
    pub avatar: Option<String>,

    /// Update location
    #[arg(long)]
    pub location: Option<String>,

    /// Update language
    #[arg(long)]
    pub language: Option<String>,

    /// Update skills (comma-separated)
    #[arg(long)]
    pub skills: Option<String>,

    /// Update interests (comma-separated)
    #[arg(long)]
    pub interests: Option<String>,

    /// Update tags (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,

    /// Update expertise level
    #[arg(long, value_enum)]
    pub expertise: Option<ExpertiseLevel>,

    /// Update what you're looking for
    #[arg(long)]
    pub looking_for: Option<String>,

    /// Update preferred tags (comma-separated)
    #[arg(long)]
    pub preferred_tags: Option<String>,

    /// Update preferred skills (comma-separated)
    #[arg(long)]
    pub preferred_skills: Option<String>,

    /// Set active status (true/false)
    #[arg(long, value_parser = parse_bool)]
    pub is_active: Option<bool>,

    /// Set public visibility (true/false)
    #[arg(long, value_parser = parse_bool)]
    pub is_public: Option<bool>,

    /// Enable/disable matching (true/false)
    #[arg(long, value_parser = parse_bool)]
    pub matching_enabled: Option<bool>,

    /// Output raw JSON instead of formatted display
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  agent-social search --requester-id 123 --skills \"Python,Machine Learning\"
  agent-social search -r 123 -s \"Python,ML\" -t \"researcher\" -m 0.5 --limit 20
  agent-social search --requester-id 123 --location \"San Francisco\"
  agent-social search --requester-id 123 --skills Python --json")]
pub struct SearchArgs {
    /// ID of the requesting agent
    #[arg(short, long)]
    pub requester_id: AgentId,

    /// Skills to match (comma-separated)
    #[arg(short, long)]
    pub skills: Option<String>,

    /// Tags to match (comma-separated)
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Interests to match (comma-separated)
    #[arg(short, long)]
    pub interests: Option<String>,

    /// Location to match
    #[arg(short, long)]
    pub location: Option<String>,

    /// Language to match
    #[arg(long)]
    pub language: Option<String>,

    /// Minimum match score (0-1)
    #[arg(short, long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub min_score: f64,

    /// Maximum number of results (1-100)
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub limit: i64,

    /// Output raw JSON instead of formatted display
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct ProbeArgs {
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_defaults() {
        let cli = Cli::try_parse_from(["agent-social", "search", "-r", "5", "-s", "Rust, Go"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.requester_id, 5);
                assert_eq!(args.skills.as_deref(), Some("Rust, Go"));
                assert_eq!(args.min_score, 0.3);
                assert_eq!(args.limit, 10);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_bool_flags() {
        let cli = Cli::try_parse_from([
            "agent-social", "update", "--agent-id", "3", "--is-public", "yes", "--matching-enabled", "off",
        ])
        .unwrap();
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.is_public, Some(true));
                assert_eq!(args.matching_enabled, Some(false));
                assert_eq!(args.is_active, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from([
            "agent-social", "update", "--agent-id", "3", "--is-public", "maybe",
        ])
        .is_err());
    }

    #[test]
    fn test_negative_numbers_reach_validation() {
        let cli = Cli::try_parse_from(["agent-social", "search", "-r", "1", "-m", "-0.5", "--limit", "-3"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.min_score, -0.5);
                assert_eq!(args.limit, -3);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["agent-social", "get", "--list", "--limit", "-1"]).unwrap();
        match cli.command {
            Commands::Get(args) => assert_eq!(args.limit, -1),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_expertise_accepts_known_levels_only() {
        assert!(Cli::try_parse_from(["agent-social", "register", "-n", "A", "-e", "a@b.io", "--expertise", "expert"]).is_ok());
        assert!(Cli::try_parse_from(["agent-social", "register", "-n", "A", "-e", "a@b.io", "--expertise", "guru"]).is_err());
    }

    #[test]
    fn test_interactive_conflicts_with_name() {
        assert!(Cli::try_parse_from(["agent-social", "register", "-i", "-n", "A"]).is_err());
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agent-social", "test-connection", "--api-url", "http://localhost:9000", "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
        assert!(cli.verbose);
    }
}
