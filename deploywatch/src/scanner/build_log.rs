//! Classification of build log lines

use serde::{Deserialize, Serialize};

use crate::models::event::LogEvent;
use crate::scanner::has_source_location;

const TYPE_ERROR_MARKER: &str = "Type error:";
const FAILED_COMPILE_MARKER: &str = "Failed to compile";

/// Lowercase keywords that mark a generic build error
const GENERIC_ERROR_KEYWORDS: &[&str] = &["error:", "error building", "build error"];

/// Errors pulled out of a build log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildErrors {
    /// A "Failed to compile" line was seen
    pub failed_compile: bool,

    /// TypeScript errors, each optionally prefixed by its source location line
    pub type_errors: Vec<String>,

    /// Other lines that look like errors
    pub other_errors: Vec<String>,
}

impl BuildErrors {
    pub fn is_empty(&self) -> bool {
        !self.failed_compile && self.type_errors.is_empty() && self.other_errors.is_empty()
    }
}

/// Classify a sequence of log lines.
///
/// Per line, the first matching rule wins:
/// 1. a type error is recorded, prefixed with the previous line when that line
///    names a `.ts`/`.tsx` location;
/// 2. "Failed to compile" only sets the flag;
/// 3. generic error keywords (case-insensitive) go to `other_errors`.
pub fn scan_lines<'a, I>(lines: I) -> BuildErrors
where
    I: IntoIterator<Item = &'a str>,
{
    let mut errors = BuildErrors::default();
    let mut prev_line = "";

    for line in lines {
        if line.contains(TYPE_ERROR_MARKER) {
            let entry = if has_source_location(prev_line) {
                format!("{}\n{}", prev_line, line)
            } else {
                line.to_string()
            };
            errors.type_errors.push(entry);
        } else if line.contains(FAILED_COMPILE_MARKER) {
            errors.failed_compile = true;
        } else if is_generic_error(line) {
            errors.other_errors.push(line.to_string());
        }

        prev_line = line;
    }

    errors
}

/// Classify the text of build events in order
pub fn scan_events(events: &[LogEvent]) -> BuildErrors {
    scan_lines(events.iter().map(LogEvent::text))
}

fn is_generic_error(line: &str) -> bool {
    let lower = line.to_lowercase();
    GENERIC_ERROR_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}
