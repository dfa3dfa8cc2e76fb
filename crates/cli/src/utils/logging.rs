use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wordforge_core::AcquisitionError;
use wordforge_domain::WordForgeError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from configuration)
/// is used. Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(default_level: &str, json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| anyhow::anyhow!("invalid log filter '{default_level}': {err}"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = if json { builder.json().try_init() } else { builder.try_init() };
    result.map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

/// Log the outcome of a command execution with structured fields.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `WordForgeError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &WordForgeError) -> &'static str {
    match error {
        WordForgeError::Config(_) => "config",
        WordForgeError::Persistence(_) => "persistence",
        WordForgeError::Network(_) => "network",
        WordForgeError::NotFound(_) => "not_found",
        WordForgeError::InvalidInput(_) => "invalid_input",
        WordForgeError::Internal(_) => "internal",
    }
}

/// Stable label for an acquisition failure.
#[inline]
pub fn acquisition_error_label(error: &AcquisitionError) -> &'static str {
    if error.is_offline() {
        "offline"
    } else {
        "configuration"
    }
}
