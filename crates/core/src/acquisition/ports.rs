//! Port interface for the external word source
//!
//! Implementations own their transport concerns (per-request timeout,
//! retries with backoff). The orchestrator adds one overall deadline on top.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use wordforge_common::{ErrorClassification, ErrorSeverity};
use wordforge_domain::{DifficultyLevel, WordForgeError};

/// Filter sent to the word source
#[derive(Debug, Clone, PartialEq)]
pub struct WordConstraints {
    pub min_length: usize,
    pub max_length: usize,
    /// Minimum occurrences per million words, exclusive
    pub min_frequency: f64,
    /// Maximum number of candidates to return
    pub limit: usize,
}

impl WordConstraints {
    /// Constraints for a difficulty level's length band
    pub fn for_level(level: DifficultyLevel, min_frequency: f64, limit: usize) -> Self {
        let band = level.length_band();
        Self { min_length: band.min, max_length: band.max, min_frequency, limit }
    }

    pub fn accepts_length(&self, len: usize) -> bool {
        (self.min_length..=self.max_length).contains(&len)
    }
}

/// Failure reported by a word source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WordSourceError {
    #[error("word source timed out after {0:?}")]
    Timeout(Duration),

    #[error("word source network failure: {message}")]
    Network { message: String, retryable: bool },

    #[error("word source returned an invalid response: {0}")]
    InvalidResponse(String),

    /// A successful response with nothing usable in it
    #[error("word source returned no usable candidates")]
    NoCandidates,

    #[error("word source disabled by configuration")]
    Disabled,
}

impl ErrorClassification for WordSourceError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Network { retryable, .. } => *retryable,
            Self::InvalidResponse(_) | Self::NoCandidates | Self::Disabled => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Disabled => ErrorSeverity::Info,
            Self::Timeout(_) | Self::Network { .. } | Self::NoCandidates => ErrorSeverity::Warning,
            Self::InvalidResponse(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl From<WordSourceError> for WordForgeError {
    fn from(err: WordSourceError) -> Self {
        WordForgeError::Network(err.to_string())
    }
}

/// Port for looking up candidate words
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Candidate words matching `constraints`
    ///
    /// An empty result is reported as [`WordSourceError::NoCandidates`]
    /// rather than `Ok(vec![])`.
    async fn query(&self, constraints: &WordConstraints) -> Result<Vec<String>, WordSourceError>;
}
