//! check-build - Entry Point
//!
//! `check-build [wait_seconds]`: wait, then report the latest deployment.
//! Exit codes: 0 ready, 1 failed or fetch error, 2 still building, 3 unknown.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use deploywatch::app::options::StatusOptions;
use deploywatch::app::status;
use deploywatch::config::env_file::{self, DEFAULT_ENV_FILE};
use deploywatch::config::settings::Settings;
use deploywatch::http::HttpClient;
use deploywatch::logs::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    // Logging is not up yet, so this goes straight to stderr.
    let file_vars = env_file::load(DEFAULT_ENV_FILE).await.unwrap_or_else(|e| {
        eprintln!("⚠️  Ignoring unreadable {}: {}", DEFAULT_ENV_FILE, e);
        HashMap::new()
    });
    let settings = match Settings::from_env(&file_vars) {
        Ok(settings) => settings,
        Err(e) => {
            println!("❌ Error: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = settings.require_credentials() {
        println!("❌ Error: {}", e);
        return ExitCode::from(1);
    }

    let options = match StatusOptions::from_args(&args) {
        Ok(options) => options,
        Err(e) => {
            println!("❌ {}", e);
            println!("Usage: check-build [wait_seconds]");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(settings.log_options()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let client = match HttpClient::new(&settings) {
        Ok(client) => client,
        Err(e) => {
            println!("❌ {}", e);
            return ExitCode::from(1);
        }
    };

    let status = status::run(&client, &settings, &options, tokio::time::sleep).await;
    ExitCode::from(status.exit_code())
}
