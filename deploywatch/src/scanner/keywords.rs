//! Flat keyword scan used by the status check

use crate::models::event::LogEvent;

/// Most lines printed for a failed build
pub const MAX_FLAGGED_LINES: usize = 20;

const KEYWORDS: &[&str] = &["error", "failed", "type error"];

/// Lines mentioning any keyword (case-insensitive), first `cap` of them
pub fn flag_lines(events: &[LogEvent], cap: usize) -> Vec<&str> {
    events
        .iter()
        .map(LogEvent::text)
        .filter(|text| {
            let lower = text.to_lowercase();
            KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .take(cap)
        .collect()
}
