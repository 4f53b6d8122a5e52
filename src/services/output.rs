use crate::domain::models::{FieldEntry, JsonOut};
use serde::Serialize;
use std::io::Write;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn field_row(entry: &FieldEntry) -> String {
    format!("  {}: {}", entry.path, entry.preview)
}

pub fn write_fields(out: &mut impl Write, entries: &[FieldEntry]) -> std::io::Result<()> {
    writeln!(out, "\n── Editable fields ──")?;
    for e in entries {
        writeln!(out, "{}", field_row(e))?;
    }
    writeln!(out)
}

pub fn banner(out: &mut impl Write, model: &str, url: &str) -> std::io::Result<()> {
    let rule = "=".repeat(58);
    writeln!(out, "{}", rule)?;
    writeln!(out, "  copydesk: site copy edits via a local LLM")?;
    writeln!(out, "  (no cloud, no subscription)")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "\nUsing model: {}", model)?;
    writeln!(out, "Ollama URL:  {}", url)
}
