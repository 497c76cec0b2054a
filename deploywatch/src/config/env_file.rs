//! `.env`-style file loading
//!
//! Only the plain `KEY=VALUE` form is understood: no quoting, escaping, `export`
//! prefixes or multi-line values. The first `=` splits key from value.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::errors::WatchError;
use crate::filesys::file::File;

/// Default env file read by both tools
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// Parse env file contents into ordered key/value pairs.
///
/// Blank lines and lines starting with `#` are skipped, as are lines with no
/// `=`. Later duplicates override earlier ones once collected into a map.
pub fn parse(contents: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        match line.trim().split_once('=') {
            Some((key, value)) => vars.push((key.trim().to_string(), value.trim().to_string())),
            None => debug!("Skipping env line {} without '='", index + 1),
        }
    }

    vars
}

/// Load an env file; a missing file yields an empty map
pub async fn load(path: impl AsRef<Path>) -> Result<HashMap<String, String>, WatchError> {
    let file = File::new(path.as_ref());

    let Some(contents) = file.read_string_opt().await? else {
        debug!("No env file at {}", file.path().display());
        return Ok(HashMap::new());
    };

    let vars: HashMap<String, String> = parse(&contents).into_iter().collect();
    debug!("Loaded {} entries from {}", vars.len(), file.path().display());
    Ok(vars)
}
