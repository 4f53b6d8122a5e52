use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "copydesk",
    version,
    about = "Apply natural-language copy edits to site content through a local LLM"
)]
pub struct Cli {
    #[arg(help = "Rewriter model (defaults to the configured model)")]
    pub model: Option<String>,
    #[arg(long, help = "Print the editable fields and exit")]
    pub list: bool,
    #[arg(long, help = "Output machine-readable JSON (with --list)")]
    pub json: bool,
    #[arg(long, help = "Content document to edit")]
    pub content: Option<PathBuf>,
    #[arg(long, help = "Config file (default: ~/.config/copydesk/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Ollama chat endpoint")]
    pub ollama_url: Option<String>,
    #[arg(long, help = "Seconds to wait for the rewriter")]
    pub timeout_secs: Option<u64>,
}
