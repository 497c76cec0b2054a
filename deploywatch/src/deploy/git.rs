//! Git push used to trigger a deployment

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::WatchError;

/// Remote pushed to when a deployment is requested
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch the hosting provider deploys from
pub const DEFAULT_BRANCH: &str = "main";

/// Push `branch` to `remote` from the repository at `repo_dir`, failing with
/// git's stderr on a non-zero exit
pub async fn push(repo_dir: &Path, remote: &str, branch: &str) -> Result<(), WatchError> {
    info!("Pushing {} to {} from {}", branch, remote, repo_dir.display());

    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(["push", remote, branch])
        .output()
        .await
        .map_err(|e| WatchError::DeployError(format!("Failed to run git push: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WatchError::DeployError(stderr.trim().to_string()));
    }

    debug!("git push: {}", String::from_utf8_lossy(&output.stderr).trim());
    Ok(())
}
