use crate::domain::models::Document;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid JSON: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} must hold a JSON object at the top level", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("cannot serialize document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("cannot write {} ({step}): {source}", .path.display())]
    Write {
        path: PathBuf,
        step: &'static str,
        source: std::io::Error,
    },
}

pub fn load_document(path: &Path) -> Result<Document, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// 2-space indented JSON with a trailing newline. Used for both the stored
/// file and the review diff, so what the operator sees is what gets written.
pub fn to_canonical_text(doc: &Document) -> Result<String, StoreError> {
    let mut text = serde_json::to_string_pretty(doc)?;
    text.push('\n');
    Ok(text)
}

/// Writes through a temp file in the target directory and renames it into
/// place, so readers see either the old or the new document. An existing
/// file keeps its permissions, and a symlinked path is written through to
/// its target.
pub fn save_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let text = to_canonical_text(doc)?;
    let target = match std::fs::canonicalize(path) {
        Ok(real) => real,
        Err(_) => path.to_path_buf(),
    };
    let path = target.as_path();
    let existing = std::fs::metadata(path).ok();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let write_err = |step: &'static str| {
        let path = path.to_path_buf();
        move |source: std::io::Error| StoreError::Write { path, step, source }
    };

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(write_err("create temp"))?;
    if let Some(meta) = existing {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err("copy permissions"))?;
    }
    tmp.write_all(text.as_bytes())
        .map_err(write_err("write temp"))?;
    tmp.flush().map_err(write_err("flush temp"))?;
    tmp.as_file().sync_all().map_err(write_err("fsync temp"))?;
    tmp.persist(path)
        .map_err(|e| write_err("rename into place")(e.error))?;
    Ok(())
}

pub fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Appends one event to the audit log. Best effort: failures are logged and
/// otherwise ignored.
pub fn audit(path: &Path, action: &str, data: Value) {
    if let Err(err) = append_audit_line(path, action, data) {
        tracing::warn!(path = %path.display(), error = %err, "audit log write skipped");
    }
}

fn append_audit_line(path: &Path, action: &str, data: Value) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(f, "{}", event)
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
