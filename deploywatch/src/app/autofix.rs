//! `autofix-deploy`: wait for the latest deployment and report build errors

use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use tracing::{error, warn};

use crate::app::options::AutofixOptions;
use crate::config::settings::Settings;
use crate::deploy::git;
use crate::http::api::DeploymentApi;
use crate::models::deployment::{Deployment, Phase};
use crate::report::{self, ErrorReport};
use crate::scanner::{extract_fix_targets, scan_events};
use crate::workers::poller::wait_for_deployment;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Deployment is live, nothing to fix
    Ready,
    /// Deployment failed and a report was produced
    Failed,
    /// No terminal state before the timeout
    TimedOut,
    /// `git push` failed
    PushFailed,
    /// Deployment failed but its build log could not be fetched
    LogsUnavailable,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Ready => 0,
            Outcome::Failed | Outcome::TimedOut | Outcome::PushFailed | Outcome::LogsUnavailable => 1,
        }
    }
}

/// Run the full push, wait and report cycle
pub async fn run<A, S, SF>(
    api: &A,
    settings: &Settings,
    options: &AutofixOptions,
    sleep_fn: S,
) -> Outcome
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    println!("{}", "🚀 Auto-Fix Deployment Monitor".bold());
    println!("{}", "=".repeat(50));

    if settings.require_credentials().is_err() {
        warn!("Vercel credentials are incomplete; API calls will fail");
    }

    if options.push_first {
        println!("📤 Pushing to GitHub to trigger deployment...");
        if let Err(e) = git::push(&options.repo_dir, &options.remote, &options.branch).await {
            println!("{}", format!("❌ Failed to push: {}", e).red());
            return Outcome::PushFailed;
        }
        println!("{}", "✅ Pushed successfully".green());
        println!();
    }

    let Some(deployment) = wait_for_deployment(api, &options.poll, sleep_fn).await else {
        println!("{}", "❌ Timeout waiting for deployment".red());
        return Outcome::TimedOut;
    };

    println!();
    println!("📋 Deployment Status: {}", deployment.ready_state);
    println!("   ID: {}", deployment.id);
    println!("   URL: {}", deployment.https_url());

    match deployment.ready_state.phase() {
        Phase::Failed => report_failure(api, settings, options, &deployment).await,
        Phase::Succeeded => {
            println!();
            println!("{}", "✅ Deployment SUCCESSFUL! No fixes needed.".green());
            if let Err(e) = report::clear(&settings.report_path).await {
                warn!("Could not remove stale error report: {}", e);
            }
            Outcome::Ready
        }
        // The poller only hands back terminal states.
        Phase::InProgress | Phase::Unknown => Outcome::Ready,
    }
}

async fn report_failure<A>(
    api: &A,
    settings: &Settings,
    options: &AutofixOptions,
    deployment: &Deployment,
) -> Outcome
where
    A: DeploymentApi + ?Sized,
{
    println!();
    println!("{}", "❌ Deployment FAILED!".red().bold());
    println!("📜 Fetching error logs...");
    println!();

    let Some(events) = api.get_build_logs(&deployment.id, options.log_limit).await else {
        println!("Could not fetch error logs");
        if let Err(e) = report::clear(&settings.report_path).await {
            warn!("Could not remove stale error report: {}", e);
        }
        return Outcome::LogsUnavailable;
    };

    let errors = scan_events(&events);
    let fixes = extract_fix_targets(&errors.type_errors);
    let report = ErrorReport::new(deployment, errors, fixes);

    let saved = match report::save(&settings.report_path, &report).await {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    };

    print_errors(&report, options.max_printed_errors);

    if saved {
        println!();
        println!("💾 Error report saved to: {}", settings.report_path.display());
    } else {
        println!();
        println!("{}", "⚠️  Could not save the error report".yellow());
    }

    Outcome::Failed
}

fn print_errors(report: &ErrorReport, max_printed: usize) {
    let errors = &report.errors;

    if errors.failed_compile {
        println!("{}", "🔴 Build failed to compile".red());
        println!();
    }

    if !errors.type_errors.is_empty() {
        println!("🔴 Found {} TypeScript errors:", errors.type_errors.len());
        println!();
        for (i, error) in errors.type_errors.iter().take(max_printed).enumerate() {
            println!("{}. {}", i + 1, error);
            println!();
        }
    }

    if !errors.other_errors.is_empty() {
        println!("🟠 Found {} other errors:", errors.other_errors.len());
        for error in errors.other_errors.iter().take(max_printed) {
            println!("   {}", error);
        }
    }

    if errors.is_empty() {
        println!("No recognizable errors in the build log");
    }

    if !report.fixes_needed.is_empty() {
        println!();
        println!("📝 Files that need fixing:");
        for fix in &report.fixes_needed {
            println!("   - {}", fix.file);
        }
    }
}
