//! The deployment API seam used by the poller and both tools

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::models::deployment::{Deployment, Project};
use crate::models::event::LogEvent;

/// Read-only view of a deployment provider.
///
/// `fetch_*` methods keep the failure category. The `get_*` methods collapse
/// every failure into `None` for callers that only need the outcome.
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Project info including its latest deployment
    async fn fetch_project(&self) -> Result<Project, ApiError>;

    /// Build events of a deployment, oldest first, at most `limit` of them
    async fn fetch_build_events(
        &self,
        deployment_id: &str,
        limit: u32,
    ) -> Result<Vec<LogEvent>, ApiError>;

    /// Latest deployment, `Ok(None)` when the project has none
    async fn fetch_latest_deployment(&self) -> Result<Option<Deployment>, ApiError> {
        let project = self.fetch_project().await?;
        Ok(project.latest_deployments.into_iter().next())
    }

    async fn get_latest_deployment(&self) -> Option<Deployment> {
        match self.fetch_latest_deployment().await {
            Ok(Some(deployment)) => Some(deployment),
            Ok(None) => {
                debug!("Project has no deployments");
                None
            }
            Err(e) => {
                warn!("Failed to fetch latest deployment: {}", e);
                None
            }
        }
    }

    async fn get_build_logs(&self, deployment_id: &str, limit: u32) -> Option<Vec<LogEvent>> {
        match self.fetch_build_events(deployment_id, limit).await {
            Ok(events) => Some(events),
            Err(e) => {
                warn!("Failed to fetch build logs for {}: {}", deployment_id, e);
                None
            }
        }
    }
}
