//! Error classification shared by WordForge crates
//!
//! Module-specific errors stay as their own `thiserror` enums and implement
//! [`ErrorClassification`] so callers can decide whether to fall through to
//! a cheaper tier, retry, or surface the failure:
//!
//! ```rust,ignore
//! #[derive(Debug, Error)]
//! pub enum StoreError {
//!     #[error("storage quota exceeded")]
//!     QuotaExceeded,
//! }
//!
//! impl ErrorClassification for StoreError {
//!     fn is_retryable(&self) -> bool { false }
//!     fn severity(&self) -> ErrorSeverity { ErrorSeverity::Warning }
//!     fn is_critical(&self) -> bool { false }
//!     fn retry_after(&self) -> Option<Duration> { None }
//! }
//! ```

use std::fmt;
use std::time::Duration;

/// Standard interface for classifying errors
///
/// Implemented by every error type that crosses a tier boundary so the
/// acquisition path can treat them uniformly when deciding what to log and
/// whether a retry makes sense.
pub trait ErrorClassification {
    /// Transient failures that may succeed if attempted again
    fn is_retryable(&self) -> bool;

    /// Severity used for log levels
    fn severity(&self) -> ErrorSeverity;

    /// Failures that indicate a defect rather than an environment problem
    fn is_critical(&self) -> bool;

    /// Suggested delay before retrying, when the failure carries one
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, degraded but operational
    Warning,
    /// Error, requires attention
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
