//! Fix-target extraction from type errors

use serde::{Deserialize, Serialize};

use crate::scanner::has_source_location;

/// Kind of error a fix target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixCategory {
    Typescript,
}

/// A file that needs attention, with the error that points at it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixTarget {
    pub file: String,

    pub error: String,

    #[serde(rename = "type")]
    pub category: FixCategory,
}

/// One target per type error that names a `.ts`/`.tsx` location.
///
/// The file is whatever precedes the first `:`, with a leading `./` removed.
/// Entries without a location are skipped.
pub fn extract_fix_targets(type_errors: &[String]) -> Vec<FixTarget> {
    type_errors
        .iter()
        .filter(|error| has_source_location(error))
        .filter_map(|error| {
            let (head, _) = error.split_once(':')?;
            let file = head.trim();
            let file = file.strip_prefix("./").unwrap_or(file);

            Some(FixTarget {
                file: file.to_string(),
                error: error.clone(),
                category: FixCategory::Typescript,
            })
        })
        .collect()
}
