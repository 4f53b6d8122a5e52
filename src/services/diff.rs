use crate::domain::models::Document;
use crate::services::storage::{to_canonical_text, StoreError};
use similar::TextDiff;

/// Unified diff of the canonical serializations. Empty when nothing changed.
pub fn render(original: &Document, candidate: &Document) -> Result<String, StoreError> {
    let before = to_canonical_text(original)?;
    let after = to_canonical_text(candidate)?;
    Ok(unified(&before, &after))
}

pub fn unified(before: &str, after: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header("BEFORE", "AFTER")
        .to_string()
}
