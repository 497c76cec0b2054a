//! Command-line options for both tools

use std::path::PathBuf;
use std::time::Duration;

use crate::deploy::git::{DEFAULT_BRANCH, DEFAULT_REMOTE};
use crate::errors::WatchError;
use crate::workers::poller::PollPolicy;

/// Options for `autofix-deploy [deploy]`
#[derive(Debug, Clone)]
pub struct AutofixOptions {
    /// Push to the remote before waiting
    pub push_first: bool,

    /// Repository the push runs in
    pub repo_dir: PathBuf,

    /// Git remote to push to
    pub remote: String,

    /// Branch to push
    pub branch: String,

    /// Polling policy for the deployment wait
    pub poll: PollPolicy,

    /// Build events requested for a failed deployment
    pub log_limit: u32,

    /// Type errors printed to the console; the report keeps all of them
    pub max_printed_errors: usize,
}

impl Default for AutofixOptions {
    fn default() -> Self {
        Self {
            push_first: false,
            repo_dir: PathBuf::from("."),
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            poll: PollPolicy::default(),
            log_limit: 500,
            max_printed_errors: 10,
        }
    }
}

impl AutofixOptions {
    /// `deploy` as the first argument requests a push; anything else is ignored
    pub fn from_args(args: &[String]) -> Self {
        Self {
            push_first: args.first().is_some_and(|arg| arg == "deploy"),
            ..Default::default()
        }
    }
}

/// Options for `check-build [wait_seconds]`
#[derive(Debug, Clone)]
pub struct StatusOptions {
    /// Wait before the first check
    pub wait: Duration,

    /// Delay between re-checks while the build is in progress
    pub interval: Duration,

    /// Re-checks after the first check
    pub max_rechecks: u32,

    /// Build events requested for a failed deployment
    pub log_limit: u32,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(120),
            interval: Duration::from_secs(30),
            max_rechecks: 10,
            log_limit: 100,
        }
    }
}

impl StatusOptions {
    pub fn from_args(args: &[String]) -> Result<Self, WatchError> {
        let mut options = Self::default();

        // Zero or negative waits skip straight to the first check.
        if let Some(raw) = args.first() {
            let secs: i64 = raw.trim().parse().map_err(|_| {
                WatchError::ConfigError(format!("wait_seconds must be an integer, got '{}'", raw))
            })?;
            options.wait = Duration::from_secs(secs.max(0).unsigned_abs());
        }

        Ok(options)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_delay: self.wait,
            interval: self.interval,
            timeout: None,
            max_checks: Some(self.max_rechecks.saturating_add(1)),
        }
    }
}
