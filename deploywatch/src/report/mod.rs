//! Failure report persisted next to the project

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::WatchError;
use crate::filesys::file::File;
use crate::models::deployment::Deployment;
use crate::scanner::{BuildErrors, FixTarget};

/// Everything known about a failed deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub deployment_id: String,

    pub deployment_url: String,

    /// Milliseconds since the epoch, as reported by the API
    pub created_at: Option<i64>,

    pub commit_sha: String,

    pub errors: BuildErrors,

    pub fixes_needed: Vec<FixTarget>,

    /// When the report was generated (local time, ISO-8601)
    pub timestamp: String,
}

impl ErrorReport {
    pub fn new(deployment: &Deployment, errors: BuildErrors, fixes_needed: Vec<FixTarget>) -> Self {
        Self {
            deployment_id: deployment.id.clone(),
            deployment_url: deployment.url.clone(),
            created_at: deployment.created_at,
            commit_sha: deployment.commit_sha().to_string(),
            errors,
            fixes_needed,
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

/// Replace the report at `path` with `report`
pub async fn save(path: impl AsRef<Path>, report: &ErrorReport) -> Result<(), WatchError> {
    let file = File::new(path.as_ref());
    if let Err(e) = file.write_json_atomic(report).await {
        // A report from an earlier run must not survive a failed rewrite.
        if let Err(clear_err) = file.delete().await {
            warn!("Could not remove stale report {}: {}", file.path().display(), clear_err);
        }
        return Err(WatchError::ReportError(format!(
            "Failed to write {}: {}",
            file.path().display(),
            e
        )));
    }
    info!("Wrote error report to {}", file.path().display());
    Ok(())
}

/// Remove a stale report; returns whether one existed
pub async fn clear(path: impl AsRef<Path>) -> Result<bool, WatchError> {
    let file = File::new(path.as_ref());
    let removed = file.delete().await?;
    if removed {
        info!("Removed stale error report {}", file.path().display());
    }
    Ok(removed)
}

/// Read a previously written report
pub async fn load(path: impl AsRef<Path>) -> Result<Option<ErrorReport>, WatchError> {
    let file = File::new(path.as_ref());
    match file.read_string_opt().await? {
        Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        None => Ok(None),
    }
}
