//! Deployment status polling

use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::http::api::DeploymentApi;
use crate::models::deployment::{Deployment, Phase};

/// When and how often to check
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Delay before the first check
    pub initial_delay: Duration,

    /// Delay between checks
    pub interval: Duration,

    /// Wall-clock budget measured from the first check
    pub timeout: Option<Duration>,

    /// Total number of checks, including the first
    pub max_checks: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            interval: Duration::from_secs(15),
            timeout: Some(Duration::from_secs(300)),
            max_checks: None,
        }
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    Pending,
}

/// Where the poll loop is when it runs a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// 1-based check number
    pub attempt: u32,

    /// Time since the first check started
    pub elapsed: Duration,
}

/// Run `check` until it is ready, the timeout elapses, or the checks run out.
///
/// Sleeps `initial_delay` once, then checks and sleeps `interval` between
/// checks. Never sleeps after the last allowed check.
pub async fn poll_until<T, C, CF, S, SF>(policy: &PollPolicy, sleep_fn: S, mut check: C) -> Option<T>
where
    C: FnMut(Tick) -> CF,
    CF: Future<Output = Poll<T>>,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    sleep_fn(policy.initial_delay).await;

    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        let elapsed = started.elapsed();
        if policy.timeout.is_some_and(|timeout| elapsed >= timeout) {
            info!("Gave up after {}s", elapsed.as_secs());
            return None;
        }

        attempt += 1;
        debug!("Check #{} ({}s elapsed)", attempt, elapsed.as_secs());

        if let Poll::Ready(value) = check(Tick { attempt, elapsed }).await {
            return Some(value);
        }

        if policy.max_checks.is_some_and(|max| attempt >= max) {
            info!("Gave up after {} checks", attempt);
            return None;
        }

        sleep_fn(policy.interval).await;
    }
}

/// Wait for the latest deployment to reach READY, ERROR or FAILED.
///
/// Fetch failures and non-terminal states both count as "not yet". Returns
/// `None` on timeout.
pub async fn wait_for_deployment<A, S, SF>(
    api: &A,
    policy: &PollPolicy,
    sleep_fn: S,
) -> Option<Deployment>
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    println!("{}", "⏳ Waiting for deployment to start...".yellow());

    poll_until(policy, sleep_fn, |tick| async move {
        let Some(deployment) = api.get_latest_deployment().await else {
            return Poll::Pending;
        };

        let state = &deployment.ready_state;
        match state.phase() {
            Phase::Succeeded | Phase::Failed => Poll::Ready(deployment),
            Phase::InProgress => {
                println!(
                    "🔄 Deployment {}... (elapsed: {}s)",
                    state,
                    tick.elapsed.as_secs()
                );
                Poll::Pending
            }
            Phase::Unknown => {
                debug!("Deployment {} in state {}", deployment.id, state);
                Poll::Pending
            }
        }
    })
    .await
}
