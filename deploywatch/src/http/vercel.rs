//! Vercel endpoints

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::errors::ApiError;
use crate::http::api::DeploymentApi;
use crate::http::client::HttpClient;
use crate::models::deployment::Project;
use crate::models::event::LogEvent;

#[async_trait]
impl DeploymentApi for HttpClient {
    async fn fetch_project(&self) -> Result<Project, ApiError> {
        let path = format!("/v9/projects/{}", self.project_id()?);
        self.get(&path, &[("latestDeployments", "1".to_string())])
            .await
    }

    async fn fetch_build_events(
        &self,
        deployment_id: &str,
        limit: u32,
    ) -> Result<Vec<LogEvent>, ApiError> {
        let path = format!("/v2/deployments/{}/events", deployment_id);
        let raw: Vec<Value> = self
            .get(
                &path,
                &[("build", "1".to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(parse_events(raw))
    }
}

/// Keep object records only; anything else in the array is noise
pub fn parse_events(raw: Vec<Value>) -> Vec<LogEvent> {
    let total = raw.len();
    let events: Vec<LogEvent> = raw
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if events.len() != total {
        debug!("Skipped {} malformed build events", total - events.len());
    }
    events
}
