//! End-to-end runs of both tools against a fake API

mod common;

use std::time::Duration;

use common::{FakeApi, Step};
use deploywatch::app::autofix::{self, Outcome};
use deploywatch::app::options::{AutofixOptions, StatusOptions};
use deploywatch::app::status::{self, CheckStatus};
use deploywatch::config::settings::Settings;
use deploywatch::report;
use tempfile::TempDir;

fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        project_id: Some("prj_test".to_string()),
        expected_project: Some("floboats".to_string()),
        report_path: dir.path().join("deployment-errors.json"),
        ..Default::default()
    }
}

fn quick_status_options() -> StatusOptions {
    StatusOptions {
        wait: Duration::ZERO,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_autofix_failure_writes_report() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let api = FakeApi::states(&["BUILDING", "ERROR"]).with_log(&[
        "Creating an optimized production build ...",
        "Failed to compile.",
        "./src/app/page.tsx:12:5",
        "Type error: Type 'string' is not assignable to type 'number'.",
        "Error: Command \"npm run build\" exited with 1",
    ]);

    let outcome = autofix::run(&api, &settings, &AutofixOptions::default(), tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(api.event_calls(), 1);

    let saved = report::load(&settings.report_path).await.unwrap().unwrap();
    assert_eq!(saved.deployment_id, "dpl_test");
    assert_eq!(saved.commit_sha, "abcdef0123456789");
    assert!(saved.errors.failed_compile);
    assert_eq!(
        saved.errors.type_errors,
        vec!["./src/app/page.tsx:12:5\nType error: Type 'string' is not assignable to type 'number'."]
    );
    assert_eq!(saved.errors.other_errors.len(), 1);
    assert_eq!(saved.fixes_needed.len(), 1);
    assert_eq!(saved.fixes_needed[0].file, "src/app/page.tsx");
}

#[tokio::test(start_paused = true)]
async fn test_autofix_success_removes_stale_report() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    std::fs::write(&settings.report_path, "{}").unwrap();

    let api = FakeApi::states(&["BUILDING", "BUILDING", "READY"]);
    let outcome = autofix::run(&api, &settings, &AutofixOptions::default(), tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::Ready);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(api.event_calls(), 0);
    assert!(!settings.report_path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_autofix_without_logs_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let api = FakeApi::states(&["FAILED"]);

    let outcome = autofix::run(&api, &settings, &AutofixOptions::default(), tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::LogsUnavailable);
    assert_eq!(outcome.exit_code(), 1);
    assert!(!settings.report_path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_autofix_timeout() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let api = FakeApi::new(vec![Step::Unavailable]);

    let outcome = autofix::run(&api, &settings, &AutofixOptions::default(), tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::TimedOut);
    assert_eq!(outcome.exit_code(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_status_rechecks_until_ready() {
    let dir = TempDir::new().unwrap();
    let api = FakeApi::states(&["BUILDING", "INITIALIZING", "READY"]);

    let status = status::run(&api, &settings_in(&dir), &quick_status_options(), tokio::time::sleep).await;

    assert_eq!(status, CheckStatus::Ready);
    assert_eq!(status.exit_code(), 0);
    assert_eq!(api.project_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_status_gives_up_while_building() {
    let dir = TempDir::new().unwrap();
    let api = FakeApi::states(&["BUILDING"]);

    let status = status::run(&api, &settings_in(&dir), &quick_status_options(), tokio::time::sleep).await;

    assert_eq!(status, CheckStatus::Building);
    assert_eq!(status.exit_code(), 2);
    assert_eq!(api.project_calls(), 11);
}

#[tokio::test(start_paused = true)]
async fn test_status_failed_build_prints_logs() {
    let dir = TempDir::new().unwrap();
    let api = FakeApi::states(&["ERROR"]).with_log(&["Type error: nope"]);

    let status = status::run(&api, &settings_in(&dir), &quick_status_options(), tokio::time::sleep).await;

    assert_eq!(status, CheckStatus::Failed);
    assert_eq!(api.project_calls(), 1);
    assert_eq!(api.event_calls(), 1);
    assert!(!settings_in(&dir).report_path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_status_fetch_errors_are_not_retried() {
    let dir = TempDir::new().unwrap();

    for step in [Step::Unavailable, Step::Garbled, Step::NoDeployments] {
        let api = FakeApi::new(vec![step, Step::State("READY")]);
        let status =
            status::run(&api, &settings_in(&dir), &quick_status_options(), tokio::time::sleep).await;

        assert_eq!(status, CheckStatus::Failed, "{:?}", step);
        assert_eq!(api.project_calls(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_status_unknown_state() {
    let dir = TempDir::new().unwrap();
    let api = FakeApi::states(&["QUEUED"]);

    let status = status::run(&api, &settings_in(&dir), &quick_status_options(), tokio::time::sleep).await;

    assert_eq!(status, CheckStatus::Unknown);
    assert_eq!(status.exit_code(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_status_waits_before_first_check() {
    let dir = TempDir::new().unwrap();
    let api = FakeApi::states(&["READY"]);
    let options = StatusOptions {
        wait: Duration::from_secs(120),
        ..Default::default()
    };
    let started = tokio::time::Instant::now();

    let status = status::run(&api, &settings_in(&dir), &options, tokio::time::sleep).await;

    assert_eq!(status, CheckStatus::Ready);
    assert!(started.elapsed() >= Duration::from_secs(120));
}

#[tokio::test(start_paused = true)]
async fn test_autofix_failed_save_drops_previous_report() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    std::fs::write(&settings.report_path, r#"{"deployment_id":"dpl_previous_run"}"#).unwrap();
    // Occupy the temp path so the atomic write cannot happen.
    std::fs::create_dir(dir.path().join("deployment-errors.json.tmp")).unwrap();

    let api = FakeApi::states(&["ERROR"]).with_log(&["lib/a.ts:1", "Type error: oops"]);
    let outcome = autofix::run(&api, &settings, &AutofixOptions::default(), tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::Failed);
    assert!(!settings.report_path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_autofix_without_logs_drops_previous_report() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    std::fs::write(&settings.report_path, r#"{"deployment_id":"dpl_previous_run"}"#).unwrap();

    let api = FakeApi::states(&["ERROR"]);
    let outcome = autofix::run(&api, &settings, &AutofixOptions::default(), tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::LogsUnavailable);
    assert!(!settings.report_path.exists());
}

#[tokio::test]
async fn test_autofix_push_failure_stops_before_polling() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let options = AutofixOptions {
        push_first: true,
        repo_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let api = FakeApi::states(&["READY"]);

    let outcome = autofix::run(&api, &settings, &options, tokio::time::sleep).await;

    assert_eq!(outcome, Outcome::PushFailed);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(api.project_calls(), 0);
}
