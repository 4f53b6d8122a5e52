//! Service layer containing the edit pipeline and its side-effect helpers.
//!
//! ## Service map
//! - `config.rs` — defaults + config.toml + CLI flag layering.
//! - `storage.rs` — document load/atomic save, canonical text, audit log.
//! - `flatten.rs` — dot-path view of the document and the field listing.
//! - `scope.rs` — section detection, rewriter payload and prompts.
//! - `rewriter.rs` — `Rewriter` trait and the Ollama chat client.
//! - `reconcile.rs` — reply sanitizing, parsing and section merge.
//! - `validate.rs` — protected-field and top-level key checks.
//! - `diff.rs` — before/after unified diff.
//! - `snapshot.rs` — `Snapshotter` trait and the git implementation.
//! - `output.rs` — text/JSON output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized (storage, rewriter, snapshot).
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod diff;
pub mod flatten;
pub mod output;
pub mod reconcile;
pub mod rewriter;
pub mod scope;
pub mod snapshot;
pub mod storage;
pub mod validate;
