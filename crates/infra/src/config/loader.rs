//! Configuration loader
//!
//! Loads application configuration from a file and environment variables.
//!
//! ## Loading Strategy
//! 1. Read an explicit file, or probe the standard locations for one
//! 2. No file found → built-in defaults
//! 3. Apply `WORDFORGE_*` environment overrides field by field
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `WORDFORGE_CACHE_CAPACITY`: Maximum number of cached anagrams
//! - `WORDFORGE_DB_PATH`: Key-value database path (`:memory:` for none)
//! - `WORDFORGE_SOURCE_URL`: Word source base URL
//! - `WORDFORGE_SOURCE_TIMEOUT_MS`: Per-request timeout in milliseconds
//! - `WORDFORGE_SOURCE_ENABLED`: Whether the word source may be called
//!   (true/false)
//! - `WORDFORGE_MIN_FREQUENCY`: Minimum word frequency per million words
//! - `WORDFORGE_DEFAULT_MODE`: `curated`, `hybrid` or `unlimited`
//! - `WORDFORGE_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./wordforge.toml` or `./wordforge.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use wordforge_domain::{AcquisitionMode, AppConfig, Result, WordForgeError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["wordforge.toml", "wordforge.json", "config.toml", "config.json"];

/// Load configuration from the first config file found, then apply
/// environment overrides
///
/// # Errors
/// Returns `WordForgeError::Config` if a found file cannot be parsed, an
/// environment override is malformed, or the final configuration is invalid.
pub fn load() -> Result<AppConfig> {
    load_from_file(None)
}

/// Load configuration from a file, then apply environment overrides
///
/// If `path` is `None`, probes the standard locations and falls back to
/// defaults when nothing is found. An explicit path must exist.
///
/// # Errors
/// Returns `WordForgeError::Config` if:
/// - The explicit file does not exist
/// - The file format is invalid or unsupported
/// - An environment override cannot be parsed
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(WordForgeError::Config(format!("Config file not found: {}", p.display())));
        }
        Some(p) => Some(p),
        None => probe_config_paths(),
    };

    let base = match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration from file");
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                WordForgeError::Config(format!("Failed to read config file: {}", e))
            })?;
            parse_config(&contents, &path)?
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            AppConfig::default()
        }
    };

    let config = apply_env_overrides(base)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WordForgeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WordForgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(WordForgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Overlay `WORDFORGE_*` environment variables on `config`
///
/// Unset variables leave the field untouched.
///
/// # Errors
/// Returns `WordForgeError::Config` if a set variable cannot be parsed.
pub fn apply_env_overrides(mut config: AppConfig) -> Result<AppConfig> {
    if let Some(capacity) = env_parse::<usize>("WORDFORGE_CACHE_CAPACITY")? {
        config.cache.capacity = capacity;
    }
    if let Some(path) = env_var("WORDFORGE_DB_PATH") {
        config.cache.database_path = path;
    }
    if let Some(url) = env_var("WORDFORGE_SOURCE_URL") {
        config.source.base_url = url;
    }
    if let Some(timeout) = env_parse::<u64>("WORDFORGE_SOURCE_TIMEOUT_MS")? {
        config.source.request_timeout_ms = timeout;
    }
    config.source.enabled = env_bool("WORDFORGE_SOURCE_ENABLED", config.source.enabled);
    if let Some(frequency) = env_parse::<f64>("WORDFORGE_MIN_FREQUENCY")? {
        config.source.min_frequency = frequency;
    }
    if let Some(mode) = env_var("WORDFORGE_DEFAULT_MODE") {
        config.acquisition.default_mode = AcquisitionMode::from_str(&mode)
            .map_err(|e| WordForgeError::Config(format!("Invalid WORDFORGE_DEFAULT_MODE: {e}")))?;
    }
    if let Some(level) = env_var("WORDFORGE_LOG_LEVEL") {
        config.log_level = level;
    }
    Ok(config)
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `WordForgeError::Config` if the variable is set but invalid.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| WordForgeError::Config(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_var(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
