//! autofix-deploy - Entry Point
//!
//! `autofix-deploy [deploy]`: optionally push, wait for the deployment to
//! finish, and write `deployment-errors.json` when the build failed.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use deploywatch::app::autofix;
use deploywatch::app::options::AutofixOptions;
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
            println!("❌ {}", e);
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

    let options = AutofixOptions::from_args(&args);
    let outcome = autofix::run(&client, &settings, &options, tokio::time::sleep).await;
    ExitCode::from(outcome.exit_code())
}
