// Rust guideline compliant 2026-10-12

//! Configuration management for Flowpath.

use crate::discovery::DEFAULT_MAX_HOPS;
use crate::engine::DEFAULT_MAX_STEPS;
use crate::store::DEFAULT_STORE_FILE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

impl OutputFormat {
    /// Parses a format name as used in config files and flags.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "table" => Some(OutputFormat::Table),
            "plain" => Some(OutputFormat::Plain),
            _ => None,
        }
    }
}

/// How requests to Jira are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum JiraAuth {
    /// Username plus API token (HTTP basic).
    Basic {
        /// Account name or email.
        username: String,
        /// API token.
        api_token: String,
    },
    /// Personal access token (HTTP bearer).
    Bearer {
        /// The token.
        token: String,
    },
}

impl fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JiraAuth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("api_token", &"<redacted>")
                .finish(),
            JiraAuth::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Connection settings for a Jira instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL ("https://example.atlassian.net").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Account name (Server/DC) or email (Cloud) for basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API token for basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Personal access token; takes precedence over basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_token: Option<String>,

    /// Force Cloud or Server mode. Detected from the URL when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<bool>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Default HTTP timeout.
fn default_timeout_secs() -> u64 {
    30
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            api_token: None,
            personal_token: None,
            cloud: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("JiraConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("api_token", &redact(&self.api_token))
            .field("personal_token", &redact(&self.personal_token))
            .field("cloud", &self.cloud)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl JiraConfig {
    /// Returns true for Jira Cloud, false for Server/Data Center.
    pub fn is_cloud(&self) -> bool {
        self.cloud.unwrap_or_else(|| {
            self.url
                .as_deref()
                .map(|url| url.to_ascii_lowercase().contains(".atlassian.net"))
                .unwrap_or(false)
        })
    }

    /// Returns the base URL without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured.
    pub fn base_url(&self) -> Result<String> {
        non_empty(&self.url)
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| Error::InvalidConfig("Jira URL is not set (JIRA_URL)".to_string()))
    }

    /// Selects the authentication mode.
    ///
    /// A personal token wins over username and API token.
    ///
    /// # Errors
    ///
    /// Returns an error if neither complete credential set is configured.
    pub fn auth(&self) -> Result<JiraAuth> {
        if let Some(token) = non_empty(&self.personal_token) {
            return Ok(JiraAuth::Bearer {
                token: token.to_string(),
            });
        }
        match (non_empty(&self.username), non_empty(&self.api_token)) {
            (Some(username), Some(api_token)) => Ok(JiraAuth::Basic {
                username: username.to_string(),
                api_token: api_token.to_string(),
            }),
            _ => Err(Error::InvalidConfig(
                "Jira credentials are not set (JIRA_PERSONAL_TOKEN, or JIRA_USERNAME and JIRA_API_TOKEN)"
                    .to_string(),
            )),
        }
    }

    /// Checks that enough is configured to talk to Jira.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming every missing setting.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if non_empty(&self.url).is_none() {
            missing.push("url (JIRA_URL)");
        }
        if non_empty(&self.personal_token).is_none() {
            if non_empty(&self.username).is_none() {
                missing.push("username (JIRA_USERNAME)");
            }
            if non_empty(&self.api_token).is_none() {
                missing.push("api_token (JIRA_API_TOKEN)");
            }
        }

        if !missing.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "Missing Jira settings: {}",
                missing.join(", ")
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "jira.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Configuration for Flowpath behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Workflow cache file. Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Default step budget for smart transitions.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Default hop limit for discovery.
    #[serde(default = "default_discovery_max_hops")]
    pub discovery_max_hops: usize,

    /// Whether transitions post an audit comment by default.
    #[serde(default)]
    pub add_comment: bool,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Log filter used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Jira connection settings.
    #[serde(default)]
    pub jira: JiraConfig,
}

/// Default step budget.
fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

/// Default discovery hop limit.
fn default_discovery_max_hops() -> usize {
    DEFAULT_MAX_HOPS
}

/// Default log filter.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            max_steps: default_max_steps(),
            discovery_max_hops: default_discovery_max_hops(),
            add_comment: false,
            output_format: OutputFormat::default(),
            log_level: default_log_level(),
            jira: JiraConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<config_dir>/config.toml`
    /// 3. Environment variables (`FLOWPATH_*`, `JIRA_*`)
    ///
    /// Jira settings are not validated here; commands that never reach the
    /// tracker work without them. Call `JiraConfig::validate` before
    /// connecting.
    ///
    /// # Arguments
    ///
    /// * `config_dir` - Path to the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - An environment variable has an invalid value
    /// - Configuration values fail validation
    pub fn load(config_dir: &Path) -> Result<Self> {
        Self::load_with(config_dir, |key| std::env::var(key).ok())
    }

    /// Like `load`, reading variables through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as `load`.
    pub fn load_with<F>(config_dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported variables:
    /// - `FLOWPATH_STORE_PATH` - Workflow cache file
    /// - `FLOWPATH_MAX_STEPS` - Default step budget
    /// - `FLOWPATH_DISCOVERY_MAX_HOPS` - Default discovery hop limit
    /// - `FLOWPATH_ADD_COMMENT` - Post audit comments (true/false)
    /// - `FLOWPATH_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `FLOWPATH_LOG_LEVEL` - Log filter
    /// - `JIRA_URL`, `JIRA_USERNAME`, `JIRA_API_TOKEN`, `JIRA_PERSONAL_TOKEN`
    /// - `JIRA_CLOUD` - Force Cloud mode (true/false)
    /// - `JIRA_TIMEOUT_SECS` - Request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if a variable value is invalid.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FLOWPATH_STORE_PATH") {
            self.store_path = Some(PathBuf::from(val));
        }

        if let Some(val) = lookup("FLOWPATH_MAX_STEPS") {
            self.max_steps = parse_var("FLOWPATH_MAX_STEPS", &val, "a positive number")?;
        }

        if let Some(val) = lookup("FLOWPATH_DISCOVERY_MAX_HOPS") {
            self.discovery_max_hops =
                parse_var("FLOWPATH_DISCOVERY_MAX_HOPS", &val, "a positive number")?;
        }

        if let Some(val) = lookup("FLOWPATH_ADD_COMMENT") {
            self.add_comment = parse_var("FLOWPATH_ADD_COMMENT", &val, "true or false")?;
        }

        if let Some(val) = lookup("FLOWPATH_OUTPUT_FORMAT") {
            self.output_format = OutputFormat::parse(&val).ok_or_else(|| {
                Error::InvalidConfig(
                    "FLOWPATH_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                )
            })?;
        }

        if let Some(val) = lookup("FLOWPATH_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Some(val) = lookup("JIRA_URL") {
            self.jira.url = Some(val);
        }
        if let Some(val) = lookup("JIRA_USERNAME") {
            self.jira.username = Some(val);
        }
        if let Some(val) = lookup("JIRA_API_TOKEN") {
            self.jira.api_token = Some(val);
        }
        if let Some(val) = lookup("JIRA_PERSONAL_TOKEN") {
            self.jira.personal_token = Some(val);
        }
        if let Some(val) = lookup("JIRA_CLOUD") {
            self.jira.cloud = Some(parse_var("JIRA_CLOUD", &val, "true or false")?);
        }
        if let Some(val) = lookup("JIRA_TIMEOUT_SECS") {
            self.jira.timeout_secs = parse_var("JIRA_TIMEOUT_SECS", &val, "a positive number")?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - max_steps is zero
    /// - discovery_max_hops is zero
    /// - log_level is empty
    fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::InvalidConfig(
                "max_steps must be greater than 0".to_string(),
            ));
        }

        if self.discovery_max_hops == 0 {
            return Err(Error::InvalidConfig(
                "discovery_max_hops must be greater than 0".to_string(),
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "log_level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolves the workflow cache path.
    ///
    /// Defaults to `<config_dir>/workflows.json`; a relative `store_path`
    /// is taken relative to `config_dir`.
    pub fn store_path(&self, config_dir: &Path) -> PathBuf {
        match &self.store_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => config_dir.join(path),
            None => config_dir.join(DEFAULT_STORE_FILE),
        }
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `config_dir` - Path to the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)?;
        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str, expected: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{} must be {}", name, expected)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_steps, 5);
        assert_eq!(config.discovery_max_hops, 50);
        assert!(!config.add_comment);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.jira.timeout_secs, 30);
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_with(temp_dir.path(), env(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
max_steps = 8
discovery_max_hops = 20
add_comment = true
output_format = "json"

[jira]
url = "https://example.atlassian.net"
username = "me@example.com"
api_token = "secret"
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load_with(temp_dir.path(), env(&[])).unwrap();
        assert_eq!(config.max_steps, 8);
        assert_eq!(config.discovery_max_hops, 20);
        assert!(config.add_comment);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.jira.is_cloud());
        assert!(config.jira.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_steps() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "max_steps = 0").unwrap();
        assert!(Config::load_with(temp_dir.path(), env(&[])).is_err());
    }

    #[test]
    fn test_config_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "max_steps = [").unwrap();
        let err = Config::load_with(temp_dir.path(), env(&[])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "max_steps = 3").unwrap();

        let config = Config::load_with(
            temp_dir.path(),
            env(&[
                ("FLOWPATH_MAX_STEPS", "7"),
                ("FLOWPATH_OUTPUT_FORMAT", "plain"),
                ("JIRA_URL", "https://jira.internal.example"),
                ("JIRA_PERSONAL_TOKEN", "pat"),
            ]),
        )
        .unwrap();

        assert_eq!(config.max_steps, 7);
        assert_eq!(config.output_format, OutputFormat::Plain);
        assert!(!config.jira.is_cloud());
        assert_eq!(
            config.jira.auth().unwrap(),
            JiraAuth::Bearer {
                token: "pat".to_string()
            }
        );
    }

    #[test]
    fn test_env_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load_with(temp_dir.path(), env(&[("FLOWPATH_MAX_STEPS", "lots")])).is_err());
        assert!(
            Config::load_with(temp_dir.path(), env(&[("FLOWPATH_OUTPUT_FORMAT", "xml")])).is_err()
        );
        assert!(Config::load_with(temp_dir.path(), env(&[("JIRA_CLOUD", "maybe")])).is_err());
    }

    #[test]
    fn test_jira_validate_reports_all_missing() {
        let err = JiraConfig::default().validate().unwrap_err().to_string();
        assert!(err.contains("url"));
        assert!(err.contains("username"));
        assert!(err.contains("api_token"));
    }

    #[test]
    fn test_jira_cloud_override() {
        let jira = JiraConfig {
            url: Some("https://example.atlassian.net".to_string()),
            cloud: Some(false),
            ..JiraConfig::default()
        };
        assert!(!jira.is_cloud());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let jira = JiraConfig {
            api_token: Some("hunter2".to_string()),
            ..JiraConfig::default()
        };
        let rendered = format!("{:?}", jira);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_store_path_resolution() {
        let dir = Path::new("/tmp/flowpath");
        let mut config = Config::default();
        assert_eq!(config.store_path(dir), dir.join("workflows.json"));

        config.store_path = Some(PathBuf::from("cache/wf.json"));
        assert_eq!(config.store_path(dir), dir.join("cache/wf.json"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let original = Config {
            max_steps: 9,
            add_comment: true,
            output_format: OutputFormat::Json,
            jira: JiraConfig {
                url: Some("https://jira.example.com".to_string()),
                personal_token: Some("pat".to_string()),
                ..JiraConfig::default()
            },
            ..Config::default()
        };

        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load_with(temp_dir.path(), env(&[])).unwrap();
        assert_eq!(original, loaded);
    }
}
