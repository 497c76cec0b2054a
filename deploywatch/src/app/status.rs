//! `check-build`: one-shot status check with re-checks while building

use std::future::Future;
use std::time::Duration;

use colored::Colorize;

use crate::app::options::StatusOptions;
use crate::config::settings::Settings;
use crate::errors::ApiError;
use crate::http::api::DeploymentApi;
use crate::models::deployment::Phase;
use crate::scanner::{flag_lines, MAX_FLAGGED_LINES};
use crate::workers::poller::{poll_until, Poll};

/// Result of a status check, mapped one-to-one onto exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ready,
    /// Build failed, or the status could not be fetched
    Failed,
    Building,
    Unknown,
}

impl CheckStatus {
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckStatus::Ready => 0,
            CheckStatus::Failed => 1,
            CheckStatus::Building => 2,
            CheckStatus::Unknown => 3,
        }
    }
}

/// Wait, check, and keep re-checking while the build is in progress
pub async fn run<A, S, SF>(
    api: &A,
    settings: &Settings,
    options: &StatusOptions,
    sleep_fn: S,
) -> CheckStatus
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    let project_id = settings.project_id.as_deref().unwrap_or_default();
    let label = settings.expected_project.as_deref().unwrap_or(project_id);

    println!("🚀 Checking Vercel deployment status for project: {}", label);
    println!("Project ID: {}", project_id);
    println!();

    if !options.wait.is_zero() {
        println!(
            "⏳ Waiting {} seconds for build to complete...",
            options.wait.as_secs()
        );
    }

    let policy = options.poll_policy();
    let status = poll_until(&policy, sleep_fn, |tick| async move {
        if tick.attempt > 1 {
            println!();
            println!("Check #{}:", tick.attempt - 1);
        }

        let status = check_deployment(api, settings, options).await;
        if status != CheckStatus::Building {
            return Poll::Ready(status);
        }

        if tick.attempt == 1 && options.max_rechecks > 0 {
            println!();
            println!(
                "🔄 Build still in progress. Checking every {} seconds...",
                options.interval.as_secs()
            );
        }
        Poll::Pending
    })
    .await;

    status.unwrap_or(CheckStatus::Building)
}

/// Fetch the latest deployment once and print what it looks like
pub async fn check_deployment<A>(
    api: &A,
    settings: &Settings,
    options: &StatusOptions,
) -> CheckStatus
where
    A: DeploymentApi + ?Sized,
{
    let project = match api.fetch_project().await {
        Ok(project) => project,
        Err(e @ ApiError::Decode(_)) => {
            println!("{}", format!("❌ Error parsing response: {}", e).red());
            return CheckStatus::Failed;
        }
        Err(e) => {
            println!("{}", format!("❌ Error fetching deployment data: {}", e).red());
            return CheckStatus::Failed;
        }
    };

    let Some(deployment) = project.latest_deployment() else {
        println!("{}", "❌ No deployments found".red());
        return CheckStatus::Failed;
    };

    println!("📋 Latest Deployment Info:");
    println!("   Project: {}", project.name);
    println!("   ID: {}", deployment.id);
    println!("   State: {}", deployment.ready_state);
    println!("   URL: {}", deployment.https_url());
    println!("   Created: {}", deployment.created_display());
    println!(
        "   Commit: {} - {}",
        deployment.short_sha(),
        deployment.commit_title()
    );
    println!();

    if let Some(expected) = &settings.expected_project {
        if &project.name != expected {
            println!(
                "{}",
                "⚠️  WARNING: Deployment might be to wrong project!".yellow()
            );
            println!("   Expected: {}", expected);
            println!("   Found: {}", project.name);
        }
    }

    match deployment.ready_state.phase() {
        Phase::Succeeded => {
            println!("{}", "✅ Build SUCCESSFUL!".green());
            CheckStatus::Ready
        }
        Phase::Failed => {
            println!("{}", "❌ Build FAILED!".red());
            print_build_logs(api, &deployment.id, options.log_limit).await;
            CheckStatus::Failed
        }
        Phase::InProgress => {
            println!("🔄 Build in progress...");
            CheckStatus::Building
        }
        Phase::Unknown => {
            println!("❓ Unknown state: {}", deployment.ready_state);
            CheckStatus::Unknown
        }
    }
}

async fn print_build_logs<A>(api: &A, deployment_id: &str, limit: u32)
where
    A: DeploymentApi + ?Sized,
{
    println!();
    println!("📜 Fetching build logs...");

    match api.fetch_build_events(deployment_id, limit).await {
        Ok(events) => {
            for line in flag_lines(&events, MAX_FLAGGED_LINES) {
                println!("   {}", line);
            }
        }
        Err(e) => println!("   Could not fetch logs: {}", e),
    }
}
