use crate::domain::models::Settings;
use crate::services::flatten::{editable_entries, flatten};
use crate::services::output::{field_row, print_out};
use crate::services::storage::load_document;

pub fn handle_list(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let doc = load_document(&settings.content_path)?;
    let entries = editable_entries(
        &flatten(&doc),
        &settings.editable_prefixes,
        settings.preview_width,
    );
    print_out(json, &entries, field_row)
}
