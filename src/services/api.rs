use crate::config::{ApiSettings, HttpSettings};
use crate::models::{
    Agent, AgentId, AgentList, Decoded, ListAgentsParams, RegisterAgentRequest, SearchRequest,
    SearchResponse, UpdateAgentRequest,
};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub(crate) const USER_AGENT: &str = concat!("agent-social/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when talking to the matching API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{status} for url: {url}")]
    Status {
        status: StatusCode,
        url: String,
        body: ErrorBody,
    },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::RequestError(e) => e.status(),
            ApiError::InvalidResponse(_) => None,
        }
    }

    /// Error body the service sent with a rejected request
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Structured error detail, e.g. `{"detail": "Agent not found"}`
    Json(Value),
    /// Anything that did not parse as JSON
    Text(String),
}

impl ErrorBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }
}

/// Matching API client
///
/// Handles all calls under the versioned base URL:
/// - Fetching and listing agents
/// - Registering and updating agents
/// - Searching for matches
pub struct AgentApiClient {
    base_url: String,
    client: Client,
}

impl AgentApiClient {
    /// Create a client rooted at `base_url` (`<host>/api/<version>`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_settings(api: &ApiSettings, http: &HttpSettings) -> Result<Self, ApiError> {
        Self::new(api.base_url(), Duration::from_secs(http.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single agent by ID
    pub async fn get_agent(&self, agent_id: AgentId) -> Result<Decoded<Agent>, ApiError> {
        let url = self.endpoint(&format!("agents/{}", agent_id));
        tracing::debug!("Fetching agent {} from {}", agent_id, url);
        self.send(self.client.get(&url), &url).await
    }

    /// List agents with pagination and optional status filters
    pub async fn list_agents(
        &self,
        params: &ListAgentsParams,
    ) -> Result<Decoded<AgentList>, ApiError> {
        let url = self.endpoint("agents");
        tracing::debug!("Listing agents from {} with {:?}", url, params);
        self.send(self.client.get(&url).query(params), &url).await
    }

    /// Register a new agent
    pub async fn register_agent(
        &self,
        request: &RegisterAgentRequest,
    ) -> Result<Decoded<Agent>, ApiError> {
        let url = self.endpoint("agents");
        tracing::debug!("Registering agent {:?} at {}", request.agent_name, url);
        self.send(self.client.post(&url).json(request), &url).await
    }

    /// Apply a partial update to an existing agent
    pub async fn update_agent(
        &self,
        agent_id: AgentId,
        request: &UpdateAgentRequest,
    ) -> Result<Decoded<Agent>, ApiError> {
        let url = self.endpoint(&format!("agents/{}", agent_id));
        tracing::debug!("Updating agent {} at {}", agent_id, url);
        self.send(self.client.put(&url).json(request), &url).await
    }

    /// Search for agents matching the requester
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Decoded<SearchResponse>, ApiError> {
        let url = self.endpoint("matching/search");
        tracing::debug!(
            "Searching matches for requester {} (min_score={}, limit={})",
            request.requester_id,
            request.min_score,
            request.limit
        );
        self.send(self.client.post(&url).json(request), &url).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Decoded<T>, ApiError> {
        let response = request.send().await?;
        let response = check_status(response, url).await?;

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Expected a JSON body: {}", e)))?;
        let data = serde_json::from_value(body.clone())
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected response shape: {}", e)))?;

        Ok(Decoded { body, data })
    }
}

/// Turn a non-2xx response into `ApiError::Status`, keeping its body
pub(crate) async fn check_status(response: Response, url: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read body".to_string());
    tracing::debug!("Request to {} failed: {} - {}", url, status, text);

    Err(ApiError::Status {
        status,
        url: url.to_string(),
        body: ErrorBody::parse(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> AgentApiClient {
        AgentApiClient::new(format!("{}/api/v1", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = AgentApiClient::new("https://api.test/api/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "https://api.test/api/v1");
        assert_eq!(client.endpoint("agents"), "https://api.test/api/v1/agents");
    }

    #[test]
    fn test_error_body_parse() {
        assert_eq!(
            ErrorBody::parse(r#"{"detail":"nope"}"#.to_string()),
            ErrorBody::Json(json!({"detail": "nope"}))
        );
        assert_eq!(
            ErrorBody::parse("Bad Gateway".to_string()),
            ErrorBody::Text("Bad Gateway".to_string())
        );
    }

    #[test]
    fn test_get_agent_keeps_raw_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v1/agents/12")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 12, "agent_name": "Ada", "extra": 1}"#)
            .create();

        let client = client_for(&server);
        let agent = tokio_test::block_on(client.get_agent(12)).unwrap();

        mock.assert();
        assert_eq!(agent.data.id, Some(12));
        assert_eq!(agent.body["extra"], json!(1));
    }

    #[test]
    fn test_list_agents_sends_only_given_filters() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v1/agents")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("skip".into(), "5".into()),
                Matcher::UrlEncoded("limit".into(), "20".into()),
                Matcher::UrlEncoded("is_public".into(), "true".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"items": [], "total": 0}"#)
            .create();

        let client = client_for(&server);
        let params = ListAgentsParams {
            skip: 5,
            limit: 20,
            is_active: None,
            is_public: Some(true),
        };
        let list = tokio_test::block_on(client.list_agents(&params)).unwrap();

        mock.assert();
        assert_eq!(list.data.total, 0);
    }

    #[test]
    fn test_status_error_carries_json_detail() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/v1/agents/404")
            .with_status(404)
            .with_body(r#"{"detail": "Agent not found"}"#)
            .create();

        let client = client_for(&server);
        let error = tokio_test::block_on(client.get_agent(404)).unwrap_err();

        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            error.body(),
            Some(&ErrorBody::Json(json!({"detail": "Agent not found"})))
        );
        assert!(error.to_string().starts_with("404 Not Found for url: "));
    }

    #[test]
    fn test_non_json_success_body_is_invalid_response() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/v1/agents/1")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create();

        let client = client_for(&server);
        let error = tokio_test::block_on(client.get_agent(1)).unwrap_err();
        assert!(matches!(error, ApiError::InvalidResponse(_)));
    }
}
