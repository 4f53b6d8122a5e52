use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use commands::{handle_list, run_edit, EditContext};
use services::config::load_settings;
use services::rewriter::OllamaRewriter;
use services::snapshot::GitSnapshotter;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    tracing::debug!(content = %settings.content_path.display(), model = %settings.model, "settings resolved");

    if cli.list {
        return handle_list(&settings, cli.json);
    }

    let rewriter = OllamaRewriter::new(
        settings.ollama_url.clone(),
        settings.model.clone(),
        settings.timeout_secs,
    );
    let snapshotter = GitSnapshotter::default();
    let ctx = EditContext {
        settings: &settings,
        rewriter: &rewriter,
        snapshotter: &snapshotter,
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();
    let outcome = run_edit(&ctx, &mut input, &mut out)?;
    tracing::debug!(?outcome, "edit finished");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
