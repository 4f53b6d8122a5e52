use crate::domain::models::{Document, FlatView, Verdict};
use crate::services::flatten::flatten;

/// Runs every check and reports all violations together.
pub fn validate(original: &Document, candidate: &Document, protected: &[String]) -> Verdict {
    let mut reasons = protected_field_violations(original, candidate, protected);
    reasons.extend(structural_violations(original, candidate));
    if reasons.is_empty() {
        Verdict::Accepted
    } else {
        Verdict::Rejected(reasons)
    }
}

/// A protected path names either a leaf or a whole subtree; every flattened
/// entry under it must come through unchanged. Paths absent from the
/// original are not checked.
pub fn protected_field_violations(
    original: &Document,
    candidate: &Document,
    protected: &[String],
) -> Vec<String> {
    let before = flatten(original);
    let after = flatten(candidate);
    protected
        .iter()
        .filter_map(|field| {
            let old = entries_under(&before, field);
            if old.is_empty() {
                return None;
            }
            let new = entries_under(&after, field);
            if old == new {
                None
            } else {
                Some(format!("Protected field '{}' was changed.", field))
            }
        })
        .collect()
}

fn entries_under(flat: &FlatView, field: &str) -> FlatView {
    flat.iter()
        .filter(|(path, _)| {
            path.as_str() == field
                || path
                    .strip_prefix(field)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
        .map(|(path, value)| (path.clone(), value.clone()))
        .collect()
}

/// Only removed sections are rejected. Added sections are logged but pass;
/// a rewrite can therefore introduce a new top-level section unnoticed.
pub fn structural_violations(original: &Document, candidate: &Document) -> Vec<String> {
    let removed: Vec<&str> = original
        .keys()
        .filter(|k| !candidate.contains_key(k.as_str()))
        .map(String::as_str)
        .collect();
    let added: Vec<&str> = candidate
        .keys()
        .filter(|k| !original.contains_key(k.as_str()))
        .map(String::as_str)
        .collect();
    if !added.is_empty() {
        tracing::warn!(keys = ?added, "candidate adds top-level sections");
    }
    if removed.is_empty() {
        Vec::new()
    } else {
        vec![format!("Top-level keys removed: {}", removed.join(", "))]
    }
}
