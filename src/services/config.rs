use crate::cli::Cli;
use crate::domain::models::{ConfigFile, Settings};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

pub fn config_dir() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config").join("copydesk"))
}

/// An explicit path must exist; the default location is optional.
pub fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(ConfigFile::default()),
        },
    };
    if explicit.is_none() && !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
}

/// Layers defaults, then the config file, then CLI flags.
pub fn resolve(file: ConfigFile, cli: &Cli) -> Result<Settings, ConfigError> {
    let mut s = Settings {
        audit_log: config_dir().map(|d| d.join("audit.jsonl")),
        ..Settings::default()
    };

    if let Some(url) = file.rewriter.url {
        s.ollama_url = url;
    }
    if let Some(model) = file.rewriter.model {
        s.model = model;
    }
    if let Some(t) = file.rewriter.timeout_secs {
        s.timeout_secs = t;
    }
    s.brand = file.rewriter.brand;
    if let Some(p) = file.content.path {
        s.content_path = p;
    }
    if let Some(label) = file.content.snapshot_label {
        s.snapshot_label = label;
    }
    if let Some(w) = file.content.preview_width {
        s.preview_width = w;
    }
    if let Some(sections) = file.fields.sections {
        s.sections = sections;
    }
    if let Some(prefixes) = file.fields.editable_prefixes {
        s.editable_prefixes = prefixes;
    }
    if let Some(protected) = file.fields.protected {
        s.protected_fields = protected;
    }

    if let Some(model) = &cli.model {
        s.model = model.clone();
    }
    if let Some(p) = &cli.content {
        s.content_path = p.clone();
    }
    if let Some(url) = &cli.ollama_url {
        s.ollama_url = url.clone();
    }
    if let Some(t) = cli.timeout_secs {
        s.timeout_secs = t;
    }

    if s.timeout_secs == 0 {
        return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
    }
    if s.preview_width == 0 {
        return Err(ConfigError::Invalid("preview_width must be positive".into()));
    }
    if s.model.trim().is_empty() {
        return Err(ConfigError::Invalid("model must not be empty".into()));
    }
    if s.sections.iter().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::Invalid("section names must not be empty".into()));
    }
    Ok(s)
}

pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let file = load_config_file(cli.config.as_deref())?;
    resolve(file, cli)
}
