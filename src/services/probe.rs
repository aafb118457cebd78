use crate::config::{ApiSettings, HttpSettings};
use crate::models::responses::{OpenApiDocument, ProbeCheck, ProbeOutcome, ProbeReport};
use crate::services::api::{ApiError, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Summary line and key/value details extracted from a successful check
type Extracted = (Option<String>, Vec<(String, String)>);

/// Issues the diagnostic GETs against the host: root, health, OpenAPI
/// document, and a one-item agent listing.
///
/// Failures are recorded per check; running the probe never fails.
pub struct ConnectivityProbe {
    api: ApiSettings,
    client: Client,
}

impl ConnectivityProbe {
    pub fn new(api: ApiSettings, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { api, client })
    }

    pub fn from_settings(api: &ApiSettings, http: &HttpSettings) -> Result<Self, ApiError> {
        Self::new(api.clone(), Duration::from_secs(http.probe_timeout_secs))
    }

    pub async fn run(&self) -> ProbeReport {
        let host = self.api.host();

        let checks = vec![
            self.check("root endpoint", "Root endpoint", format!("{}/", host), text_summary)
                .await,
            self.check("health endpoint", "Health check", format!("{}/health", host), text_summary)
                .await,
            self.check(
                "OpenAPI documentation",
                "OpenAPI spec",
                format!("{}/openapi.json", host),
                openapi_details,
            )
            .await,
            self.check(
                "agents endpoint",
                "Agents endpoint",
                format!("{}/agents?limit=1", self.api.base_url()),
                agent_total,
            )
            .await,
        ];

        ProbeReport {
            api_url: host.to_string(),
            api_version: self.api.version.clone(),
            checks,
        }
    }

    async fn check<F>(
        &self,
        name: &'static str,
        label: &'static str,
        url: String,
        extract: F,
    ) -> ProbeCheck
    where
        F: FnOnce(&str) -> Result<Extracted, String>,
    {
        tracing::debug!("Probing {}", url);
        let outcome = match self.fetch(&url).await {
            Ok((200, body)) => match extract(&body) {
                Ok((summary, details)) => ProbeOutcome::Ok { summary, details },
                Err(error) => ProbeOutcome::Failed { error },
            },
            Ok((status, _)) => ProbeOutcome::UnexpectedStatus { status },
            Err(e) => ProbeOutcome::Failed { error: e.to_string() },
        };

        if !matches!(outcome, ProbeOutcome::Ok { .. }) {
            tracing::debug!("{} check did not pass: {:?}", name, outcome);
        }

        ProbeCheck {
            name,
            label,
            url,
            outcome,
        }
    }

    async fn fetch(&self, url: &str) -> Result<(u16, String), reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn text_summary(body: &str) -> Result<Extracted, String> {
    Ok((Some(body.trim().to_string()), Vec::new()))
}

fn openapi_details(body: &str) -> Result<Extracted, String> {
    let document: OpenApiDocument =
        serde_json::from_str(body).map_err(|e| format!("invalid OpenAPI document: {}", e))?;
    let info = document.info;
    Ok((
        None,
        vec![
            ("Title".to_string(), info.title.unwrap_or_else(|| "Unknown".to_string())),
            ("Version".to_string(), info.version.unwrap_or_else(|| "Unknown".to_string())),
        ],
    ))
}

fn agent_total(body: &str) -> Result<Extracted, String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("invalid agent list: {}", e))?;
    let total = value.get("total").and_then(Value::as_u64).unwrap_or(0);
    Ok((None, vec![("Total agents".to_string(), total.to_string())]))
}
