//! Command handlers
//!
//! Each handler returns a JSON value that `main` prints to stdout.

pub mod acquire;
pub mod cache;

use std::time::Instant;

use serde_json::Value;

use crate::cli::Command;
use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Dispatch a parsed command against the context
pub async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<Value> {
    let started = Instant::now();
    let (name, result) = match command {
        Command::Acquire { level, mode, count } => {
            ("acquire", acquire::acquire(ctx, level, mode, count).await)
        }
        Command::Stats => ("stats", Ok(cache::stats(ctx))),
        Command::Clear { level } => ("clear", Ok(cache::clear(ctx, level))),
        Command::Preload { file } => ("preload", cache::preload(ctx, &file)),
    };
    log_command_execution(name, started.elapsed(), result.is_ok());
    result
}
