//! Build log scanning.
//!
//! Everything here is a single forward pass over the log lines; the only
//! context carried between lines is the line immediately before.

pub mod build_log;
pub mod fixes;
pub mod keywords;

pub use build_log::{scan_events, scan_lines, BuildErrors};
pub use fixes::{extract_fix_targets, FixCategory, FixTarget};
pub use keywords::{flag_lines, MAX_FLAGGED_LINES};

/// True when a line points at a TypeScript source location (`file.ts:12`)
pub fn has_source_location(line: &str) -> bool {
    line.contains(".tsx:") || line.contains(".ts:")
}
