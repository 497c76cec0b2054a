//! Runtime settings resolved once at startup

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use url::Url;

use crate::errors::WatchError;
use crate::logs::{self, LogLevel, LogOptions};

pub const TOKEN_KEY: &str = "VERCEL_TOKEN";
pub const PROJECT_ID_KEY: &str = "VERCEL_PROJECT_ID";
pub const TEAM_ID_KEY: &str = "VERCEL_TEAM_ID";
pub const PROJECT_NAME_KEY: &str = "VERCEL_PROJECT_NAME";
pub const API_URL_KEY: &str = "VERCEL_API_URL";
pub const LOG_LEVEL_KEY: &str = "DEPLOYWATCH_LOG";
pub const LOG_FORMAT_KEY: &str = "DEPLOYWATCH_LOG_FORMAT";

pub const DEFAULT_API_URL: &str = "https://api.vercel.com";
pub const DEFAULT_REPORT_FILE: &str = "deployment-errors.json";

/// Settings shared by both tools
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bearer token for the Vercel API
    pub token: Option<SecretString>,

    /// Project id or name
    pub project_id: Option<String>,

    /// Team scope, sent as `teamId` when set
    pub team_id: Option<String>,

    /// Project name the status check expects to see
    pub expected_project: Option<String>,

    /// API base URL
    pub api_base_url: Url,

    /// Where the failure report is written
    pub report_path: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: None,
            project_id: None,
            team_id: None,
            expected_project: None,
            api_base_url: default_api_url(),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            log_level: LogLevel::default(),
            log_json: false,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}

impl Settings {
    /// Resolve settings from env-file values layered over a lookup into the
    /// inherited environment. File values take precedence.
    pub fn resolve<F>(file_vars: &HashMap<String, String>, env_lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            file_vars
                .get(key)
                .cloned()
                .or_else(|| env_lookup(key))
                .filter(|value| !value.trim().is_empty())
        };

        let api_base_url = match get(API_URL_KEY) {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| WatchError::ConfigError(format!("Invalid {}: {}", API_URL_KEY, e)))?,
            None => default_api_url(),
        };

        let log_level = match get(LOG_LEVEL_KEY) {
            Some(raw) => raw.parse().map_err(WatchError::ConfigError)?,
            None => LogLevel::default(),
        };

        let log_json = match get(LOG_FORMAT_KEY) {
            Some(raw) => logs::parse_json_format(&raw).map_err(WatchError::ConfigError)?,
            None => false,
        };

        Ok(Self {
            token: get(TOKEN_KEY).map(SecretString::from),
            project_id: get(PROJECT_ID_KEY),
            team_id: get(TEAM_ID_KEY),
            expected_project: get(PROJECT_NAME_KEY),
            api_base_url,
            log_level,
            log_json,
            ..Default::default()
        })
    }

    /// Resolve settings against the real process environment
    pub fn from_env(file_vars: &HashMap<String, String>) -> Result<Self, WatchError> {
        Self::resolve(file_vars, |key| std::env::var(key).ok())
    }

    /// Logging options derived from these settings
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            json_format: self.log_json,
        }
    }

    /// Fail unless both the token and the project id are present
    pub fn require_credentials(&self) -> Result<(), WatchError> {
        let mut missing = Vec::new();
        if self.token.is_none() {
            missing.push(TOKEN_KEY);
        }
        if self.project_id.is_none() {
            missing.push(PROJECT_ID_KEY);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WatchError::ConfigError(format!(
                "{} must be set in .env.local or the environment",
                missing.join(" and ")
            )))
        }
    }
}
