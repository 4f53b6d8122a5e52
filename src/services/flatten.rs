use crate::domain::models::{Document, FieldEntry, FlatView};
use serde_json::{Map, Value};

/// Projects the tree onto dot-paths. Objects are descended; everything else,
/// arrays included, is a leaf.
pub fn flatten(doc: &Document) -> FlatView {
    let mut out = FlatView::new();
    flatten_into(doc, "", &mut out);
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut FlatView) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &path, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

pub fn is_editable(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| path.starts_with(p.as_str()))
}

pub fn editable_entries(flat: &FlatView, prefixes: &[String], width: usize) -> Vec<FieldEntry> {
    flat.iter()
        .filter(|(path, _)| is_editable(path, prefixes))
        .map(|(path, value)| FieldEntry {
            path: path.clone(),
            preview: preview(value, width),
        })
        .collect()
}

/// Single-line preview of a leaf: cut to `width` chars, then newlines escaped.
pub fn preview(value: &Value, width: usize) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let truncated = text.chars().count() > width;
    let mut shown: String = text.chars().take(width).collect();
    shown = shown.replace('\n', "\\n");
    if truncated {
        shown.push('…');
    }
    shown
}
