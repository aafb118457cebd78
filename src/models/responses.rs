use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::models::domain::{Agent, AgentMatch};

/// Response for `GET /agents`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Agent>,
    #[serde(default)]
    pub total: u64,
}

/// Response for `POST /matching/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub matches: Vec<AgentMatch>,
    #[serde(default)]
    pub total: u64,
}

/// The `info` block of the service's OpenAPI document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OpenApiDocument {
    #[serde(default)]
    pub info: OpenApiInfo,
}

/// A decoded response body together with the JSON the service sent
///
/// `body` is what `--json` prints; `data` is the typed view used for display.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub body: Value,
    pub data: T,
}

/// Result of one diagnostic request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Ok {
        summary: Option<String>,
        details: Vec<(String, String)>,
    },
    UnexpectedStatus {
        #[serde(rename = "status_code")]
        status: u16,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeCheck {
    pub name: &'static str,
    pub label: &'static str,
    pub url: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

/// Connectivity report for one API host
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub api_url: String,
    pub api_version: String,
    pub checks: Vec<ProbeCheck>,
}

impl ProbeReport {
    pub fn all_ok(&self) -> bool {
        self.checks
            .iter()
            .all(|c| matches!(c.outcome, ProbeOutcome::Ok { .. }))
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_defaults() {
        let response: SearchResponse = serde_json::from_value(json!({"matches": null})).unwrap();
        assert!(response.matches.is_empty());
        assert_eq!(response.total, 0);
    }

    #[test]
    fn test_agent_list_decodes_items() {
        let list: AgentList = serde_json::from_value(json!({
            "items": [{"id": 1, "agent_name": "Ada"}, {"id": 2}],
            "total": 42
        }))
        .unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.total, 42);
        assert_eq!(list.items[0].agent_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_probe_report_serializes_tagged_outcomes() {
        let report = ProbeReport {
            api_url: "http://api.test".to_string(),
            api_version: "v1".to_string(),
            checks: vec![
                ProbeCheck {
                    name: "health endpoint",
                    label: "Health check",
                    url: "http://api.test/health".to_string(),
                    outcome: ProbeOutcome::Ok { summary: Some("ok".to_string()), details: Vec::new() },
                },
                ProbeCheck {
                    name: "agents endpoint",
                    label: "Agents endpoint",
                    url: "http://api.test/api/v1/agents?limit=1".to_string(),
                    outcome: ProbeOutcome::UnexpectedStatus { status: 502 },
                },
            ],
        };
        assert!(!report.all_ok());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["checks"][0]["status"], "ok");
        assert_eq!(value["checks"][0]["summary"], "ok");
        assert_eq!(value["checks"][1]["status"], "unexpected_status");
        assert_eq!(value["checks"][1]["status_code"], 502);
    }
}
