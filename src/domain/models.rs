use crate::domain::constants::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Full site content tree. The root is always an object; key order is kept.
pub type Document = serde_json::Map<String, Value>;

/// Dot-path -> leaf value, in depth-first order of the source tree.
pub type FlatView = indexmap::IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditScope {
    Whole,
    Section(String),
}

impl EditScope {
    pub fn label(&self) -> String {
        match self {
            EditScope::Whole => "whole".to_string(),
            EditScope::Section(name) => format!("section:{}", name),
        }
    }
}

/// What gets sent to the rewriter for one edit.
#[derive(Debug, Clone)]
pub struct ScopedRequest {
    pub scope: EditScope,
    pub payload: Value,
    /// Tells the rewriter which response shape is expected.
    pub scope_note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    Skipped,
    Published,
    Failed(String),
}

/// How an interactive edit ended. Only transport and I/O failures are errors;
/// everything here is a normal termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    NoInstruction,
    ParseFailed { preview: String },
    Rejected { reasons: Vec<String> },
    NoChanges,
    Cancelled,
    Applied { snapshot: SnapshotStatus },
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub path: String,
    pub preview: String,
}

/// On-disk config overrides. Every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub rewriter: RewriterSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub fields: FieldsSection,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RewriterSection {
    pub url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub brand: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    pub path: Option<PathBuf>,
    pub snapshot_label: Option<String>,
    pub preview_width: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FieldsSection {
    pub sections: Option<Vec<String>>,
    pub editable_prefixes: Option<Vec<String>>,
    pub protected: Option<Vec<String>>,
}

/// Resolved, immutable settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ollama_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub brand: Option<String>,
    pub content_path: PathBuf,
    pub snapshot_label: String,
    pub preview_width: usize,
    /// Where applied edits are recorded; `None` disables the audit trail.
    pub audit_log: Option<PathBuf>,
    pub sections: Vec<String>,
    pub editable_prefixes: Vec<String>,
    pub protected_fields: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            brand: None,
            content_path: PathBuf::from(DEFAULT_CONTENT_FILE),
            snapshot_label: DEFAULT_SNAPSHOT_LABEL.to_string(),
            preview_width: DEFAULT_PREVIEW_WIDTH,
            audit_log: None,
            sections: owned(DEFAULT_SECTIONS),
            editable_prefixes: owned(DEFAULT_EDITABLE_PREFIXES),
            protected_fields: owned(DEFAULT_PROTECTED_FIELDS),
        }
    }
}
