use crate::domain::constants::RAW_PREVIEW_CHARS;
use crate::domain::models::{EditOutcome, EditScope, Settings, SnapshotStatus, Verdict};
use crate::services::flatten::{editable_entries, flatten};
use crate::services::output::{banner, write_fields};
use crate::services::reconcile::reconcile;
use crate::services::rewriter::Rewriter;
use crate::services::snapshot::Snapshotter;
use crate::services::storage::{audit, digest, load_document, save_document, to_canonical_text};
use crate::services::validate::validate;
use crate::services::{diff, scope};
use std::io::{BufRead, Write};

pub struct EditContext<'a> {
    pub settings: &'a Settings,
    pub rewriter: &'a dyn Rewriter,
    pub snapshotter: &'a dyn Snapshotter,
}

/// One interactive edit: load, ask, rewrite, reconcile, validate, diff,
/// confirm, save, optionally snapshot. Nothing is written before the operator
/// confirms a validated, non-empty diff.
pub fn run_edit(
    ctx: &EditContext<'_>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<EditOutcome> {
    let s = ctx.settings;
    banner(out, &s.model, &s.ollama_url)?;

    let original = load_document(&s.content_path)?;
    let entries = editable_entries(&flatten(&original), &s.editable_prefixes, s.preview_width);
    write_fields(out, &entries)?;

    writeln!(
        out,
        "Enter your instruction (e.g., 'Make the Home headline more formal'):"
    )?;
    let instruction = prompt(input, out, "→ ")?;
    if instruction.is_empty() {
        writeln!(out, "No instruction given. Exiting.")?;
        return Ok(EditOutcome::NoInstruction);
    }

    let request = scope::build_request(&instruction, &original, &s.sections);
    let system = scope::system_prompt(s.brand.as_deref(), &request.scope_note);
    let user = scope::user_prompt(&instruction, &request.payload)?;

    writeln!(
        out,
        "\n⏳ Calling Ollama ({})… this may take a few minutes.",
        s.model
    )?;
    if let EditScope::Section(name) = &request.scope {
        writeln!(out, "   Editing section: {}", name)?;
    }
    tracing::info!(scope = %request.scope.label(), "rewrite requested");
    let raw = ctx.rewriter.rewrite(&system, &user)?;

    let candidate = match reconcile(&raw, &original, &request.scope) {
        Ok(doc) => doc,
        Err(err) => {
            let preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
            tracing::warn!(error = %err, "rewriter reply rejected before validation");
            writeln!(out, "\n✖ {}", err)?;
            writeln!(out, "  Raw response (first {} chars):", RAW_PREVIEW_CHARS)?;
            writeln!(out, "  {}", preview)?;
            return Ok(EditOutcome::ParseFailed { preview });
        }
    };

    if let Verdict::Rejected(reasons) = validate(&original, &candidate, &s.protected_fields) {
        tracing::warn!(count = reasons.len(), "candidate failed validation");
        writeln!(out, "\n✖ Validation failed:")?;
        for r in &reasons {
            writeln!(out, "  - {}", r)?;
        }
        writeln!(out, "  No changes written.")?;
        return Ok(EditOutcome::Rejected { reasons });
    }

    let changes = diff::render(&original, &candidate)?;
    if changes.trim().is_empty() {
        writeln!(out, "\n  No changes detected.")?;
        return Ok(EditOutcome::NoChanges);
    }
    writeln!(out, "\n── Changes ──")?;
    write!(out, "{}", changes)?;

    if !confirm(input, out, "\nApply these changes? [y/N] ")? {
        writeln!(out, "  Cancelled. No changes written.")?;
        return Ok(EditOutcome::Cancelled);
    }

    let before_sha256 = digest(&to_canonical_text(&original)?);
    let after_sha256 = digest(&to_canonical_text(&candidate)?);
    save_document(&s.content_path, &candidate)?;
    writeln!(out, "  ✔ {} updated.", s.content_path.display())?;
    if let Some(log) = &s.audit_log {
        audit(
            log,
            "edit_applied",
            serde_json::json!({
                "content": s.content_path.to_string_lossy(),
                "model": s.model,
                "scope": request.scope.label(),
                "before_sha256": before_sha256,
                "after_sha256": after_sha256,
            }),
        );
    }

    let snapshot = if confirm(input, out, "Commit and push to the remote? [y/N] ")? {
        match ctx.snapshotter.snapshot(&s.content_path, &s.snapshot_label) {
            Ok(()) => {
                writeln!(out, "  ✔ Committed and pushed to remote.")?;
                SnapshotStatus::Published
            }
            Err(err) => {
                tracing::warn!(error = %err, "snapshot skipped");
                writeln!(out, "  ⚠ {}", err)?;
                SnapshotStatus::Failed(err.to_string())
            }
        }
    } else {
        SnapshotStatus::Skipped
    };

    writeln!(out, "\nDone.")?;
    Ok(EditOutcome::Applied { snapshot })
}

/// Reads one trimmed line; end of input reads as empty.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> std::io::Result<String> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> std::io::Result<bool> {
    Ok(prompt(input, out, label)?.eq_ignore_ascii_case("y"))
}
