//! Agent Social - command-line client for the agent social matching API
//!
//! This library backs the `agent-social` binary: configuration, a typed API
//! client, input validation and the human-readable renderings of responses.
//! Matching itself happens server-side; scores are only displayed.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use models::{Agent, AgentMatch, ExpertiseLevel, RegisterAgentRequest, SearchRequest, UpdateAgentRequest};
pub use services::{AgentApiClient, ApiError, ConnectivityProbe};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let settings = Settings::load_with_env(None, Default::default()).unwrap();
        let client = AgentApiClient::from_settings(&settings.api, &settings.http).unwrap();
        assert!(client.base_url().ends_with("/api/v1"));
    }
}
