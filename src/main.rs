use agent_social::cli::Cli;
use agent_social::commands::{self, EXIT_FAILURE};
use agent_social::logging;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Error: Failed to load configuration: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    logging::init_logging(&settings.logging, cli.verbose);
    tracing::debug!("Using API base URL {}", settings.api.base_url());

    let code = commands::execute(
        cli.command,
        &settings,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;

    ExitCode::from(code)
}
