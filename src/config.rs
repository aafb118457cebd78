use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default API host, shared by every command
pub const DEFAULT_API_URL: &str = "https://agentapi.agentapp.space";
/// Default API version segment
pub const DEFAULT_API_VERSION: &str = "v1";

/// Host override variable kept for compatibility with existing deployments
pub const API_URL_VAR: &str = "NEXTMARKET_API_URL";
/// Version override variable kept for compatibility with existing deployments
pub const API_VERSION_VAR: &str = "NEXTMARKET_API_VERSION";

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub url: String,
    pub version: String,
}

impl ApiSettings {
    /// Host with any trailing slash removed
    pub fn host(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Root for all endpoint calls: `<host>/api/<version>`
    pub fn base_url(&self) -> String {
        format!("{}/api/{}", self.host(), self.version)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }
fn default_probe_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from defaults, optional files and the process environment
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with AGENT_SOCIAL__)
    /// 4. NEXTMARKET_API_URL / NEXTMARKET_API_VERSION
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None, None)
    }

    /// Load configuration from a custom path instead of the config/ directory
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()), None)
    }

    /// Load configuration against an explicit environment instead of the process one
    pub fn load_with_env(
        path: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        Self::build(path, Some(env))
    }

    /// Apply command-line overrides on top of the loaded settings
    pub fn with_overrides(mut self, api_url: Option<String>, api_version: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api.url = url;
        }
        if let Some(version) = api_version.filter(|v| !v.is_empty()) {
            self.api.version = version;
        }
        self
    }

    fn build(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("api.url", DEFAULT_API_URL)?
            .set_default("api.version", DEFAULT_API_VERSION)?
            .set_default("http.timeout_secs", default_timeout_secs())?
            .set_default("http.probe_timeout_secs", default_probe_timeout_secs())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false)),
        };

        // e.g., AGENT_SOCIAL__HTTP__TIMEOUT_SECS -> http.timeout_secs
        let environment = Environment::with_prefix("AGENT_SOCIAL")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env.clone());

        let settings = builder.add_source(environment).build()?;

        let lookup = |key: &str| match &env {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        };

        substitute_legacy_vars(settings, lookup)?.try_deserialize()
    }
}

/// Apply the NEXTMARKET_* host/version variables over everything else
fn substitute_legacy_vars<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.is_empty()) {
        builder = builder.set_override("api.url", url)?;
    }
    if let Some(version) = lookup(API_VERSION_VAR).filter(|v| !v.is_empty()) {
        builder = builder.set_override("api.version", version)?;
    }

    builder.build()
}
