//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep document, scope, verdict and report types in one place.
//! - Avoid cyclic imports between services and command handlers.
//! - Make `--json` output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — document aliases, edit scope, verdicts, settings, outcomes.
//! - `constants.rs` — built-in defaults (endpoint, sections, field sets).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `FieldEntry` and `JsonOut` shape the `--list --json` output.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
