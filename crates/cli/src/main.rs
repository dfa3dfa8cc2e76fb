//! WordForge command-line entry point

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};
use wordforge_cli::utils::logging::{error_label, init_tracing};
use wordforge_cli::{commands, AppContext, Cli};
use wordforge_infra::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before configuration so WORDFORGE_* overrides apply
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = config::load_from_file(cli.config.clone()).context("loading configuration")?;
    init_tracing(&config.log_level, cli.json_logs)?;
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(%err, "no .env file loaded"),
    }

    let ctx = AppContext::new_with_config(config)
        .inspect_err(|err| error!(label = error_label(err), %err, "startup failed"))
        .context("initializing application context")?;
    let result = commands::run(&ctx, cli.command).await;
    // The shared cache outlives main, so hit metadata is written here
    if let Some(outcome) = ctx.cache.flush() {
        debug!(?outcome, "flushed anagram cache before exit");
    }
    let output = result?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
