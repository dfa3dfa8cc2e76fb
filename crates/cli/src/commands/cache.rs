//! Cache introspection commands

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde_json::{json, Value};
use wordforge_domain::{AnagramRecord, DifficultyLevel};

use crate::context::AppContext;

pub fn stats(ctx: &AppContext) -> Value {
    let stats = ctx.cache.stats();
    let per_level: BTreeMap<String, usize> = DifficultyLevel::all()
        .map(|level| (level.to_string(), ctx.cache.count_for(level)))
        .collect();

    json!({
        "cache": stats,
        "hit_rate": stats.hit_rate(),
        "per_level": per_level,
        "persistence_failures": ctx.cache.persistence_failures(),
    })
}

/// Clear one level, or everything when `level` is `None`
pub fn clear(ctx: &AppContext, level: Option<DifficultyLevel>) -> Value {
    match level {
        Some(level) => {
            let removed = ctx.cache.clear_difficulty(level);
            json!({ "level": level, "removed": removed })
        }
        None => {
            let removed = ctx.cache.len();
            let persist = ctx.cache.clear();
            json!({ "removed": removed, "persist": persist })
        }
    }
}

/// Load a JSON array of records into the cache
///
/// Every record is validated while parsing; one invalid record rejects the
/// whole file.
pub fn preload(ctx: &AppContext, file: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading preload file {}", file.display()))?;
    let records: Vec<AnagramRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing anagram records from {}", file.display()))?;

    let summary = ctx.cache.preload(records);
    Ok(json!({ "summary": summary, "cached": ctx.cache.len() }))
}
