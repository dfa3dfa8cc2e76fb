use anyhow::Context;
use serde_json::{json, Value};
use tracing::warn;
use wordforge_domain::{AcquisitionMode, DifficultyLevel};

use crate::context::AppContext;
use crate::utils::logging::acquisition_error_label;

/// Acquire `count` anagrams for `level`
///
/// Falls back to the configured default mode when `mode` is `None`. Stops
/// at the first failure, which in practice only happens in unlimited mode
/// while offline.
pub async fn acquire(
    ctx: &AppContext,
    level: DifficultyLevel,
    mode: Option<AcquisitionMode>,
    count: usize,
) -> anyhow::Result<Value> {
    let mode = mode.unwrap_or(ctx.config.acquisition.default_mode);
    let mut records = Vec::with_capacity(count);

    for _ in 0..count {
        let record = ctx.acquisition.acquire(level, mode).await.inspect_err(|err| {
            let label = acquisition_error_label(err);
            warn!(level = level.get(), %mode, label, "acquire failed");
        });
        records.push(record.with_context(|| format!("acquiring level {level} in {mode} mode"))?);
    }

    Ok(json!({
        "level": level,
        "mode": mode,
        "records": records,
        "stats": ctx.acquisition.stats(),
    }))
}
