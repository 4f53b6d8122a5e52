//! Command handler layer.
//!
//! This module owns operator-facing orchestration and output wiring.
//!
//! ## Files
//! - `edit.rs` — the interactive edit session.
//! - `fields.rs` — `--list` field listing.
//!
//! ## Principles
//! - Read operator input and write reports here.
//! - Delegate business logic to `services/*`.
//! - Keep prompts and `--json` output stable.

pub mod edit;
pub mod fields;

pub use edit::{run_edit, EditContext};
pub use fields::handle_list;
