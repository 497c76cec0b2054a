//! Report persistence tests

use deploywatch::models::deployment::{Deployment, DeploymentMeta, ReadyState};
use deploywatch::report::{self, ErrorReport};
use deploywatch::scanner::{extract_fix_targets, scan_lines};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

fn failed_deployment() -> Deployment {
    Deployment {
        id: "dpl_42".to_string(),
        url: "floboats-42.vercel.app".to_string(),
        ready_state: ReadyState::Error,
        created_at: Some(1_700_000_000_000),
        meta: Some(DeploymentMeta {
            github_commit_sha: Some("feedface".to_string()),
            github_commit_message: None,
        }),
    }
}

fn sample_report(type_error: &str) -> ErrorReport {
    let errors = scan_lines(["lib/boat.ts:7:1", type_error, "Build error: see above"]);
    let fixes = extract_fix_targets(&errors.type_errors);
    ErrorReport::new(&failed_deployment(), errors, fixes)
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment-errors.json");
    let report = sample_report("Type error: hull is undefined");

    assert_ok!(report::save(&path, &report).await);

    let loaded = assert_ok!(report::load(&path).await).unwrap();
    assert_eq!(loaded, report);
    assert!(!dir.path().join("deployment-errors.json.tmp").exists());
}

#[tokio::test]
async fn test_report_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment-errors.json");
    assert_ok!(report::save(&path, &sample_report("Type error: x")).await);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(json["deployment_id"], "dpl_42");
    assert_eq!(json["deployment_url"], "floboats-42.vercel.app");
    assert_eq!(json["created_at"], 1_700_000_000_000i64);
    assert_eq!(json["commit_sha"], "feedface");
    assert_eq!(json["errors"]["failed_compile"], false);
    assert_eq!(json["errors"]["type_errors"][0], "lib/boat.ts:7:1\nType error: x");
    assert_eq!(json["errors"]["other_errors"][0], "Build error: see above");
    assert_eq!(json["fixes_needed"][0]["file"], "lib/boat.ts");
    assert_eq!(json["fixes_needed"][0]["type"], "typescript");
    assert!(json["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_save_replaces_previous_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment-errors.json");

    assert_ok!(report::save(&path, &sample_report("Type error: first run")).await);
    assert_ok!(report::save(&path, &sample_report("Type error: second run")).await);

    let loaded = assert_ok!(report::load(&path).await).unwrap();
    assert_eq!(loaded.errors.type_errors.len(), 1);
    assert!(loaded.errors.type_errors[0].ends_with("second run"));
}

#[tokio::test]
async fn test_clear() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment-errors.json");

    assert!(!assert_ok!(report::clear(&path).await));

    assert_ok!(report::save(&path, &sample_report("Type error: y")).await);
    assert!(assert_ok!(report::clear(&path).await));
    assert!(!path.exists());
    assert!(assert_ok!(report::load(&path).await).is_none());
}

#[tokio::test]
async fn test_load_rejects_corrupt_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment-errors.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_err!(report::load(&path).await);
}
