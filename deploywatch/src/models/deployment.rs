//! Deployment models

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Vercel `readyState` of a deployment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReadyState {
    Queued,
    Building,
    Deploying,
    Initializing,
    Ready,
    Error,
    Failed,
    /// Anything the API sends that we do not recognise
    Other(String),
}

/// Coarse classification of a [`ReadyState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Succeeded,
    Failed,
    Unknown,
}

impl ReadyState {
    pub fn as_str(&self) -> &str {
        match self {
            ReadyState::Queued => "QUEUED",
            ReadyState::Building => "BUILDING",
            ReadyState::Deploying => "DEPLOYING",
            ReadyState::Initializing => "INITIALIZING",
            ReadyState::Ready => "READY",
            ReadyState::Error => "ERROR",
            ReadyState::Failed => "FAILED",
            ReadyState::Other(raw) => raw,
        }
    }

    /// QUEUED is deliberately not in progress: it maps to unknown
    pub fn phase(&self) -> Phase {
        match self {
            ReadyState::Building | ReadyState::Deploying | ReadyState::Initializing => {
                Phase::InProgress
            }
            ReadyState::Ready => Phase::Succeeded,
            ReadyState::Error | ReadyState::Failed => Phase::Failed,
            ReadyState::Queued | ReadyState::Other(_) => Phase::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase(), Phase::Succeeded | Phase::Failed)
    }
}

impl From<String> for ReadyState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "QUEUED" => ReadyState::Queued,
            "BUILDING" => ReadyState::Building,
            "DEPLOYING" => ReadyState::Deploying,
            "INITIALIZING" => ReadyState::Initializing,
            "READY" => ReadyState::Ready,
            "ERROR" => ReadyState::Error,
            "FAILED" => ReadyState::Failed,
            _ => ReadyState::Other(raw),
        }
    }
}

impl From<ReadyState> for String {
    fn from(state: ReadyState) -> Self {
        state.as_str().to_string()
    }
}

impl Default for ReadyState {
    fn default() -> Self {
        ReadyState::Other("Unknown".to_string())
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Git metadata attached to a deployment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentMeta {
    #[serde(default)]
    pub github_commit_sha: Option<String>,

    #[serde(default)]
    pub github_commit_message: Option<String>,
}

/// A deployment as returned in a project's `latestDeployments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Unique deployment ID
    pub id: String,

    /// Deployment hostname, without scheme
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ready_state: ReadyState,

    /// Creation time in milliseconds since the epoch
    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub meta: Option<DeploymentMeta>,
}

impl Deployment {
    pub fn https_url(&self) -> String {
        format!("https://{}", self.url)
    }

    pub fn commit_sha(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|meta| meta.github_commit_sha.as_deref())
            .unwrap_or("")
    }

    pub fn short_sha(&self) -> &str {
        let sha = self.commit_sha();
        sha.char_indices().nth(7).map_or(sha, |(end, _)| &sha[..end])
    }

    /// First line of the commit message
    pub fn commit_title(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|meta| meta.github_commit_message.as_deref())
            .and_then(|message| message.lines().next())
            .unwrap_or("No commit message")
    }

    /// Local `YYYY-mm-dd HH:MM:SS`, or `Unknown` when absent
    pub fn created_display(&self) -> String {
        self.created_at
            .filter(|ms| *ms != 0)
            .and_then(DateTime::from_timestamp_millis)
            .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Project info with its most recent deployments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_deployments: Vec<Deployment>,
}

impl Project {
    pub fn latest_deployment(&self) -> Option<&Deployment> {
        self.latest_deployments.first()
    }
}
