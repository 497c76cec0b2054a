//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::settings::Settings;
use crate::errors::{ApiError, WatchError};

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Vercel REST API
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
    project_id: Option<String>,
    team_id: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from resolved settings
    pub fn new(settings: &Settings) -> Result<Self, WatchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WatchError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.as_str().trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            project_id: settings.project_id.clone(),
            team_id: settings.team_id.clone(),
        })
    }

    pub(crate) fn project_id(&self) -> Result<&str, ApiError> {
        self.project_id
            .as_deref()
            .ok_or(ApiError::MissingCredentials("VERCEL_PROJECT_ID"))
    }

    /// Make an authenticated GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let token = self
            .token
            .as_ref()
            .ok_or(ApiError::MissingCredentials("VERCEL_TOKEN"))?;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
            .query(query);

        if let Some(team_id) = &self.team_id {
            request = request.query(&[("teamId", team_id)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET failed: {} - {}", status, body);
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok(body)
    }
}
