pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/chat";
pub const DEFAULT_MODEL: &str = "deepseek-r1:8b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_CONTENT_FILE: &str = "content/site.json";
pub const DEFAULT_SNAPSHOT_LABEL: &str = "content: update via copydesk";
pub const DEFAULT_PREVIEW_WIDTH: usize = 80;

/// How much of an unparseable rewriter reply is echoed back to the operator.
pub const RAW_PREVIEW_CHARS: usize = 500;

/// Checked in this order; the first section named in an instruction wins.
pub const DEFAULT_SECTIONS: &[&str] = &["home", "about", "services", "contact", "footer"];

/// Dot-path prefixes shown in the field listing.
pub const DEFAULT_EDITABLE_PREFIXES: &[&str] = &[
    "home.",
    "about.",
    "services.",
    "contact.",
    "footer.",
    "meta.siteDescription",
];

/// Dot-paths that must survive every edit unchanged.
pub const DEFAULT_PROTECTED_FIELDS: &[&str] = &[
    "meta.siteTitle",
    "meta.consultant",
    "meta.email",
    "contact.email",
    "nav",
];

pub const REASONING_OPEN: &str = "<think>";
pub const REASONING_CLOSE: &str = "</think>";
pub const FENCE_MARKER: &str = "```";
