// Command handlers, one per subcommand
pub mod get;
pub mod probe;
pub mod register;
pub mod search;
pub mod update;

use crate::cli::Commands;
use crate::config::Settings;
use crate::models::describe_validation_errors;
use crate::services::{AgentApiClient, ApiError, ErrorBody};
use serde_json::Value;
use std::io::{self, Write};
use thiserror::Error;
use validator::ValidationErrors;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Errors surfaced by a command; every variant maps to exit code 1
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to read input: {0}")]
    Prompt(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationErrors> for CommandError {
    fn from(errors: ValidationErrors) -> Self {
        CommandError::Validation(describe_validation_errors(&errors))
    }
}

impl From<dialoguer::Error> for CommandError {
    fn from(error: dialoguer::Error) -> Self {
        CommandError::Prompt(error.to_string())
    }
}

/// Run one command and report any error on `err`
///
/// Returns the process exit code.
pub async fn execute<W: Write, E: Write>(
    command: Commands,
    settings: &Settings,
    out: &mut W,
    err: &mut E,
) -> u8 {
    match dispatch(command, settings, out).await {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            tracing::debug!("Command failed: {:?}", error);
            if let Err(io_error) = report_error(&error, err) {
                tracing::error!("Failed to write diagnostic: {}", io_error);
            }
            EXIT_FAILURE
        }
    }
}

/// Route a parsed command to its handler
pub async fn dispatch<W: Write>(
    command: Commands,
    settings: &Settings,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        Commands::Get(args) => get::run(&client(settings)?, args, out).await,
        Commands::Register(args) => register::run(&client(settings)?, args, out).await,
        Commands::Update(args) => update::run(&client(settings)?, args, out).await,
        Commands::Search(args) => search::run(&client(settings)?, args, out).await,
        Commands::TestConnection(args) => probe::run(settings, args, out).await,
    }
}

fn client(settings: &Settings) -> Result<AgentApiClient, CommandError> {
    Ok(AgentApiClient::from_settings(&settings.api, &settings.http)?)
}

/// Write either the server's JSON or the rendered text
pub(crate) fn emit<W, F>(out: &mut W, json: bool, body: &Value, render: F) -> Result<(), CommandError>
where
    W: Write,
    F: FnOnce() -> String,
{
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(body)?)?;
    } else {
        writeln!(out, "{}", render())?;
    }
    Ok(())
}

/// Print a short diagnostic for a failed command
///
/// HTTP errors include the service's error body, pretty-printed when it is JSON.
pub fn report_error<E: Write>(error: &CommandError, err: &mut E) -> io::Result<()> {
    match error {
        CommandError::Api(api_error) => {
            writeln!(err, "❌ API Error: {}", api_error)?;
            match api_error.body() {
                Some(ErrorBody::Json(detail)) => {
                    let pretty = serde_json::to_string_pretty(detail)
                        .unwrap_or_else(|_| detail.to_string());
                    writeln!(err, "Details: {}", pretty)?;
                }
                Some(ErrorBody::Text(text)) if !text.trim().is_empty() => {
                    writeln!(err, "Response: {}", text)?;
                }
                _ => {}
            }
        }
        other => writeln!(err, "❌ Error: {}", other)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn render(error: &CommandError) -> String {
        let mut buffer = Vec::new();
        report_error(error, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_report_validation_error() {
        let text = render(&CommandError::Validation("Invalid email format: x".to_string()));
        assert_eq!(text, "❌ Error: Invalid email format: x\n");
    }

    #[test]
    fn test_report_api_error_with_json_detail() {
        let error = CommandError::Api(ApiError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            url: "http://api.test/api/v1/agents".to_string(),
            body: ErrorBody::Json(json!({"detail": "teamily_id already registered"})),
        });
        let text = render(&error);
        assert!(text.starts_with("❌ API Error: 422 Unprocessable Entity for url: http://api.test/api/v1/agents\n"));
        assert!(text.contains("Details: {\n  \"detail\": \"teamily_id already registered\"\n}"));
    }

    #[test]
    fn test_report_api_error_with_text_body() {
        let error = CommandError::Api(ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            url: "http://api.test/".to_string(),
            body: ErrorBody::Text("upstream down".to_string()),
        });
        assert!(render(&error).ends_with("Response: upstream down\n"));
    }

    #[test]
    fn test_emit_selects_output() {
        let body = json!({"id": 1});
        let mut out = Vec::new();
        emit(&mut out, true, &body, || "formatted".to_string()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"id\": 1\n}\n");

        let mut out = Vec::new();
        emit(&mut out, false, &body, || "formatted".to_string()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "formatted\n");
    }
}
