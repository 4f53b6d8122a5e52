//! Turns a rewriter reply back into a full candidate document.
//!
//! The reply is untrusted text. It is sanitized by a fixed sequence of pure
//! transforms (reasoning block, fence lines), parsed, and then merged into a
//! copy of the original according to the edit scope.

use crate::domain::constants::{FENCE_MARKER, REASONING_CLOSE, REASONING_OPEN};
use crate::domain::models::{Document, EditScope};
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum ReconcileError {
    #[error("rewriter returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("rewriter returned {found} where a full document object was expected")]
    NotAnObject { found: &'static str },
}

/// Removes every complete reasoning block. An opening marker without a
/// closing one is left alone along with everything after it.
pub fn strip_reasoning(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(REASONING_OPEN) {
        let after_open = &rest[start + REASONING_OPEN.len()..];
        let Some(end) = after_open.find(REASONING_CLOSE) else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &after_open[end + REASONING_CLOSE.len()..];
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Drops fence marker lines (```` ``` ```` or ```` ```json ````), keeping the
/// rest in order.
pub fn strip_fences(text: &str) -> String {
    if !text.contains(FENCE_MARKER) {
        return text.to_string();
    }
    text.lines()
        .filter(|line| !line.trim().starts_with(FENCE_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

pub fn sanitize(raw: &str) -> String {
    strip_fences(&strip_reasoning(raw.trim()))
}

pub fn parse_reply(raw: &str) -> Result<Value, ReconcileError> {
    Ok(serde_json::from_str(&sanitize(raw))?)
}

/// Builds the candidate document. `original` is never modified; section
/// edits start from a copy of it so untouched sections stay identical.
pub fn reconcile(
    raw: &str,
    original: &Document,
    scope: &EditScope,
) -> Result<Document, ReconcileError> {
    let parsed = parse_reply(raw)?;
    match scope {
        EditScope::Whole => match parsed {
            Value::Object(doc) => Ok(doc),
            other => Err(ReconcileError::NotAnObject {
                found: kind_of(&other),
            }),
        },
        EditScope::Section(name) => {
            let section = match parsed {
                Value::Object(mut wrapper) if wrapper.contains_key(name) => {
                    wrapper.remove(name).unwrap_or(Value::Null)
                }
                bare => {
                    tracing::debug!(section = %name, "reply has no wrapper key; using it as the section");
                    bare
                }
            };
            let mut candidate = original.clone();
            candidate.insert(name.clone(), section);
            Ok(candidate)
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
