//! Acquisition orchestrator - core business logic

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;
use wordforge_domain::constants::{MAX_SCRAMBLE_ATTEMPTS, SOURCE_CATEGORY, SOURCE_ID_PREFIX};
use wordforge_domain::{
    distinct_letter_count, validate_solution, AcquisitionMode, AnagramRecord, DifficultyLevel,
    SourceSettings,
};

use super::error::AcquisitionError;
use super::metrics::{AcquisitionMetrics, AcquisitionStats};
use super::ports::{WordConstraints, WordSource, WordSourceError};
use crate::cache::AnagramCache;
use crate::puzzle::{CuratedPool, Scrambler};
use crate::random::RandomSource;

/// Answers "give me a playable anagram of difficulty D" under a mode
///
/// Tier order is cache, then external source, then curated pool, with the
/// mode deciding which tiers may run. The source call is the only await
/// point; it runs under an overall deadline and no lock is held across it.
pub struct AcquisitionService {
    cache: Arc<AnagramCache>,
    source: Arc<dyn WordSource>,
    curated: Arc<CuratedPool>,
    scrambler: Scrambler,
    rng: RandomSource,
    settings: SourceSettings,
    metrics: AcquisitionMetrics,
}

impl AcquisitionService {
    /// Create a service with default source settings and an entropy-seeded
    /// random source
    pub fn new(
        cache: Arc<AnagramCache>,
        source: Arc<dyn WordSource>,
        curated: Arc<CuratedPool>,
    ) -> Self {
        let rng = RandomSource::from_entropy();
        Self {
            cache,
            source,
            curated,
            scrambler: Scrambler::new(MAX_SCRAMBLE_ATTEMPTS, rng.clone()),
            rng,
            settings: SourceSettings::default(),
            metrics: AcquisitionMetrics::default(),
        }
    }

    /// Override frequency threshold, candidate limit, deadline and the
    /// enabled switch
    pub fn with_source_settings(mut self, settings: SourceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_scramble_attempts(mut self, max_attempts: u32) -> Self {
        self.scrambler = Scrambler::new(max_attempts, self.rng.clone());
        self
    }

    /// Use `rng` for every random choice, scrambling included
    pub fn with_rng(mut self, rng: RandomSource) -> Self {
        self.scrambler = Scrambler::new(self.scrambler.max_attempts(), rng.clone());
        self.rng = rng;
        self
    }

    /// Produce an anagram for `level`
    ///
    /// # Errors
    /// - `SourceUnavailable` only in `UnlimitedOnly` mode, on a cache miss
    ///   followed by a source failure
    /// - `Configuration` when the curated pool has no words for `level` and
    ///   the curated tier is reached
    pub async fn acquire(
        &self,
        level: DifficultyLevel,
        mode: AcquisitionMode,
    ) -> Result<AnagramRecord, AcquisitionError> {
        match mode {
            AcquisitionMode::Curated => self.serve_curated(level),
            AcquisitionMode::Hybrid => {
                if let Some(record) = self.from_cache(level) {
                    return Ok(record);
                }
                match self.from_source(level).await {
                    Ok(record) => Ok(record),
                    Err(error) => {
                        warn!(level = level.get(), %error, "word source failed, using curated");
                        self.serve_curated(level)
                    }
                }
            }
            AcquisitionMode::UnlimitedOnly => {
                if let Some(record) = self.from_cache(level) {
                    return Ok(record);
                }
                self.from_source(level).await.map_err(|error| {
                    warn!(level = level.get(), %error, "word source failed in unlimited mode");
                    AcquisitionError::SourceUnavailable { reason: error.to_string() }
                })
            }
        }
    }

    pub fn stats(&self) -> AcquisitionStats {
        self.metrics.snapshot()
    }

    pub fn cache(&self) -> &Arc<AnagramCache> {
        &self.cache
    }

    fn from_cache(&self, level: DifficultyLevel) -> Option<AnagramRecord> {
        let record = self.cache.get(level)?;
        self.metrics.record_cache_hit();
        info!(level = level.get(), id = record.id(), tier = "cache", "anagram acquired");
        Some(record)
    }

    async fn from_source(&self, level: DifficultyLevel) -> Result<AnagramRecord, WordSourceError> {
        let result = self.query_source(level).await;
        match &result {
            Ok(record) => {
                self.metrics.record_source_success();
                info!(level = level.get(), id = record.id(), tier = "source", "anagram acquired");
            }
            Err(_) => self.metrics.record_source_failure(),
        }
        result
    }

    async fn query_source(&self, level: DifficultyLevel) -> Result<AnagramRecord, WordSourceError> {
        if !self.settings.enabled {
            return Err(WordSourceError::Disabled);
        }

        let constraints = WordConstraints::for_level(
            level,
            self.settings.min_frequency,
            self.settings.candidate_limit,
        );
        let deadline = self.settings.deadline();
        debug!(level = level.get(), ?constraints, ?deadline, "querying word source");

        let candidates = tokio::time::timeout(deadline, self.source.query(&constraints))
            .await
            .map_err(|_| WordSourceError::Timeout(deadline))??;

        let word =
            self.pick_candidate(candidates, &constraints).ok_or(WordSourceError::NoCandidates)?;
        let scrambled = self.scrambler.scramble(&word);
        let record = AnagramRecord::new(
            format!("{SOURCE_ID_PREFIX}-{}", Uuid::now_v7()),
            word.clone(),
            scrambled,
            SOURCE_CATEGORY,
            source_hint(&word),
            level,
        )
        .map_err(|err| WordSourceError::InvalidResponse(err.to_string()))?;

        // Mutate the cache only once the source call has fully completed
        let outcome = self.cache.set(level, record.clone());
        debug!(?outcome, "cached source record");
        Ok(record)
    }

    fn pick_candidate(
        &self,
        candidates: Vec<String>,
        constraints: &WordConstraints,
    ) -> Option<String> {
        let total = candidates.len();
        let usable: Vec<String> = candidates
            .into_iter()
            .map(|word| word.trim().to_ascii_uppercase())
            .filter(|word| is_usable(word, constraints))
            .collect();
        debug!(total, usable = usable.len(), "filtered source candidates");
        self.rng.choose(&usable).cloned()
    }

    fn serve_curated(&self, level: DifficultyLevel) -> Result<AnagramRecord, AcquisitionError> {
        let word = self
            .rng
            .choose(self.curated.by_difficulty(level))
            .ok_or(AcquisitionError::Configuration { level })?;

        let record = self.curated.record_for(level, word, &self.scrambler).map_err(|error| {
            warn!(level = level.get(), word = %word.word, %error, "curated word is invalid");
            AcquisitionError::Configuration { level }
        })?;

        self.metrics.record_curated();
        info!(level = level.get(), id = record.id(), tier = "curated", "anagram acquired");
        Ok(record)
    }
}

fn is_usable(word: &str, constraints: &WordConstraints) -> bool {
    validate_solution(word).is_ok()
        && constraints.accepts_length(word.len())
        && distinct_letter_count(word) >= 2
}

fn source_hint(word: &str) -> String {
    let first = word.chars().next().unwrap_or('?');
    format!("Starts with '{first}', {} letters", word.len())
}
