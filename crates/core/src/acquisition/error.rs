//! Errors surfaced by the acquisition API

use std::time::Duration;

use thiserror::Error;
use wordforge_common::{ErrorClassification, ErrorSeverity};
use wordforge_domain::{DifficultyLevel, WordForgeError};

/// Why an anagram could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// The external source failed and the mode forbids the curated fallback
    #[error("word source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// The curated pool has nothing for this level
    #[error("curated pool has no entries for difficulty {level}")]
    Configuration { level: DifficultyLevel },
}

impl AcquisitionError {
    /// True for failures a player should see as "offline"
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

impl ErrorClassification for AcquisitionError {
    fn is_retryable(&self) -> bool {
        self.is_offline()
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SourceUnavailable { .. } => ErrorSeverity::Warning,
            Self::Configuration { .. } => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl From<AcquisitionError> for WordForgeError {
    fn from(err: AcquisitionError) -> Self {
        match err {
            AcquisitionError::SourceUnavailable { .. } => WordForgeError::Network(err.to_string()),
            AcquisitionError::Configuration { .. } => WordForgeError::Config(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_only_for_source_unavailable() {
        let offline = AcquisitionError::SourceUnavailable { reason: "timeout".into() };
        let broken = AcquisitionError::Configuration { level: DifficultyLevel::new(3).unwrap() };

        assert!(offline.is_offline());
        assert!(!broken.is_offline());
        assert!(broken.is_critical());
        assert_eq!(offline.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn maps_into_domain_error() {
        let err: WordForgeError =
            AcquisitionError::Configuration { level: DifficultyLevel::new(5).unwrap() }.into();
        assert!(matches!(err, WordForgeError::Config(msg) if msg.contains("difficulty 5")));
    }
}
