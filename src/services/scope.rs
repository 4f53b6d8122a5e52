//! Narrows an edit to one section when the instruction names it.
//!
//! Detection is a plain substring scan and only decides what is sent to the
//! rewriter. The validator still checks the whole document afterwards.

use crate::domain::models::{Document, EditScope, ScopedRequest};
use serde_json::Value;

/// First entry of `sections` (in list order) that the instruction mentions.
pub fn detect_section<'a>(instruction: &str, sections: &'a [String]) -> Option<&'a str> {
    let lowered = instruction.to_lowercase();
    sections
        .iter()
        .find(|name| lowered.contains(&name.to_lowercase()))
        .map(String::as_str)
}

/// A section that the document does not have falls back to `Whole`.
pub fn scope(instruction: &str, doc: &Document, sections: &[String]) -> EditScope {
    match detect_section(instruction, sections) {
        Some(name) if doc.contains_key(name) => EditScope::Section(name.to_string()),
        Some(name) => {
            tracing::debug!(section = name, "named section missing from document; editing whole");
            EditScope::Whole
        }
        None => EditScope::Whole,
    }
}

pub fn payload(scope: &EditScope, doc: &Document) -> Value {
    match scope {
        EditScope::Whole => Value::Object(doc.clone()),
        EditScope::Section(name) => {
            let mut wrapped = Document::new();
            wrapped.insert(
                name.clone(),
                doc.get(name).cloned().unwrap_or(Value::Null),
            );
            Value::Object(wrapped)
        }
    }
}

pub fn scope_note(scope: &EditScope) -> String {
    match scope {
        EditScope::Whole => "Return the complete JSON with your edits applied.".to_string(),
        EditScope::Section(name) => format!(
            "You are editing ONLY the '{name}' section. Return ONLY this section as JSON \
             (a single object with one key: '{name}')."
        ),
    }
}

pub fn build_request(instruction: &str, doc: &Document, sections: &[String]) -> ScopedRequest {
    let scope = scope(instruction, doc, sections);
    ScopedRequest {
        payload: payload(&scope, doc),
        scope_note: scope_note(&scope),
        scope,
    }
}

pub fn system_prompt(brand: Option<&str>, scope_note: &str) -> String {
    let brand = brand.unwrap_or("a professional consulting business");
    format!(
        "You are an expert copywriter for {brand}. You will receive site content \
         as JSON and a user instruction.\n\
         \n\
         RULES:\n\
         - {scope_note}\n\
         - Do NOT wrap the output in markdown code fences.\n\
         - Do NOT include any explanation, only output valid JSON.\n\
         - Keep the same JSON structure and all keys intact.\n\
         - Maintain a formal, professional tone throughout.\n\
         - Keep edits minimal and targeted to the user's instruction.\n"
    )
}

pub fn user_prompt(instruction: &str, payload: &Value) -> Result<String, serde_json::Error> {
    Ok(format!(
        "INSTRUCTION: {}\n\nCURRENT CONTENT:\n{}",
        instruction,
        serde_json::to_string_pretty(payload)?
    ))
}
