//! Scripted `WordSource` implementations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wordforge_core::{WordConstraints, WordSource, WordSourceError};

/// Returns a fixed candidate list and counts calls
#[derive(Default)]
pub struct ScriptedSource {
    words: Vec<String>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(words: &[&str]) -> Self {
        Self { words: words.iter().map(|w| (*w).to_string()).collect(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordSource for ScriptedSource {
    async fn query(&self, _constraints: &WordConstraints) -> Result<Vec<String>, WordSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.words.is_empty() {
            return Err(WordSourceError::NoCandidates);
        }
        Ok(self.words.clone())
    }
}

/// Always fails with a network error
#[derive(Default)]
pub struct FailingSource {
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordSource for FailingSource {
    async fn query(&self, _constraints: &WordConstraints) -> Result<Vec<String>, WordSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(WordSourceError::Network { message: "connection refused".into(), retryable: true })
    }
}

/// Answers only after `delay`
pub struct SlowSource {
    delay: Duration,
    words: Vec<String>,
}

impl SlowSource {
    pub fn new(delay: Duration, words: &[&str]) -> Self {
        Self { delay, words: words.iter().map(|w| (*w).to_string()).collect() }
    }
}

#[async_trait]
impl WordSource for SlowSource {
    async fn query(&self, _constraints: &WordConstraints) -> Result<Vec<String>, WordSourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.words.clone())
    }
}
