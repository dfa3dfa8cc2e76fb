//! Integration tests for the acquisition orchestrator

mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use support::sources::{FailingSource, ScriptedSource, SlowSource};
use support::stores::MemoryStore;
use support::{crane, level};
use wordforge_core::{
    AcquisitionError, AcquisitionService, AnagramCache, CuratedPool, CuratedWord, RandomSource,
    WordSource,
};
use wordforge_domain::{is_letter_permutation, AcquisitionMode, DifficultyLevel, SourceSettings};

fn cache() -> Arc<AnagramCache> {
    Arc::new(
        AnagramCache::builder(Arc::new(MemoryStore::new())).rng(RandomSource::seeded(1)).build(),
    )
}

fn service(cache: Arc<AnagramCache>, source: Arc<dyn WordSource>) -> AcquisitionService {
    AcquisitionService::new(cache, source, Arc::new(CuratedPool::builtin()))
        .with_rng(RandomSource::seeded(7))
}

fn small_pool() -> CuratedPool {
    CuratedPool::from_entries([
        (level(1), CuratedWord::new("CRANE", "Birds", "A wading bird")),
        (level(1), CuratedWord::new("MANGO", "Fruit", "Tropical fruit")),
        (level(1), CuratedWord::new("TABLE", "Furniture", "You eat at it")),
    ])
    .unwrap()
}

#[tokio::test]
async fn curated_mode_serves_valid_scrambles_from_the_pool() {
    let source = Arc::new(ScriptedSource::new(&["PLANT"]));
    let service = AcquisitionService::new(cache(), source.clone(), Arc::new(small_pool()))
        .with_rng(RandomSource::seeded(11));
    let words: HashSet<&str> = ["CRANE", "MANGO", "TABLE"].into_iter().collect();

    for _ in 0..100 {
        let record = service.acquire(level(1), AcquisitionMode::Curated).await.unwrap();
        assert!(words.contains(record.solution()));
        assert_ne!(record.scrambled(), record.solution());
        assert!(is_letter_permutation(record.solution(), record.scrambled()));
        assert!(record.id().starts_with("curated-"));
    }

    assert_eq!(source.calls(), 0);
    assert!(service.cache().is_empty());
    assert_eq!(service.stats().curated_served, 100);
}

#[tokio::test]
async fn hybrid_never_fails_when_the_source_is_down() {
    let source = Arc::new(FailingSource::default());
    let service = service(cache(), source.clone());

    for level in DifficultyLevel::all() {
        let record = service.acquire(level, AcquisitionMode::Hybrid).await.unwrap();
        assert_eq!(record.difficulty(), level);
        assert!(level.length_band().contains(record.solution().len()));
        assert!(record.id().starts_with("curated-"));
    }

    let stats = service.stats();
    assert_eq!(stats.source_failures, 5);
    assert_eq!(stats.curated_served, 5);
    assert_eq!(source.calls(), 5);
}

#[tokio::test]
async fn unlimited_only_reports_offline_instead_of_substituting() {
    let service = service(cache(), Arc::new(FailingSource::default()));

    let err = service.acquire(level(2), AcquisitionMode::UnlimitedOnly).await.unwrap_err();
    assert!(err.is_offline());
    assert!(matches!(err, AcquisitionError::SourceUnavailable { .. }));
    assert_eq!(service.stats().curated_served, 0);
}

#[tokio::test]
async fn cache_hit_skips_the_source() {
    let cache = cache();
    cache.set(level(1), crane("cached"));
    let source = Arc::new(ScriptedSource::new(&["PLANT"]));
    let service = service(Arc::clone(&cache), source.clone());

    for mode in [AcquisitionMode::UnlimitedOnly, AcquisitionMode::Hybrid] {
        let record = service.acquire(level(1), mode).await.unwrap();
        assert_eq!(record.id(), "cached");
    }

    assert_eq!(source.calls(), 0);
    assert_eq!(service.stats().cache_hits, 2);
    assert_eq!(cache.stats().hits, 2);
}

#[tokio::test]
async fn source_word_is_scrambled_and_cached() {
    let cache = cache();
    let source = Arc::new(ScriptedSource::new(&[" plant ", "can't", "STRANGER"]));
    let service = service(Arc::clone(&cache), source.clone());

    let record = service.acquire(level(1), AcquisitionMode::UnlimitedOnly).await.unwrap();
    assert_eq!(record.solution(), "PLANT");
    assert_ne!(record.scrambled(), "PLANT");
    assert!(record.id().starts_with("src-"));
    assert_eq!(record.category(), "Open Dictionary");
    assert_eq!(record.hint(), "Starts with 'P', 5 letters");
    assert_eq!(cache.count_for(level(1)), 1);

    // The next request is answered from the cache
    let again = service.acquire(level(1), AcquisitionMode::UnlimitedOnly).await.unwrap();
    assert_eq!(again.id(), record.id());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn unusable_candidates_count_as_a_source_failure() {
    let source = Arc::new(ScriptedSource::new(&["AB", "ZZZZZ", "PINEAPPLES"]));
    let service = service(cache(), source);

    let err = service.acquire(level(1), AcquisitionMode::UnlimitedOnly).await.unwrap_err();
    assert!(err.is_offline());

    let record = service.acquire(level(1), AcquisitionMode::Hybrid).await.unwrap();
    assert!(record.id().starts_with("curated-"));
    assert_eq!(service.stats().source_failures, 2);
}

#[tokio::test]
async fn slow_source_is_cut_off_by_the_deadline() {
    let cache = cache();
    let source = Arc::new(SlowSource::new(Duration::from_secs(5), &["PLANT"]));
    let settings = SourceSettings { deadline_ms: 50, ..SourceSettings::default() };
    let service = service(Arc::clone(&cache), source).with_source_settings(settings);

    let started = std::time::Instant::now();
    let record = service.acquire(level(1), AcquisitionMode::Hybrid).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(record.id().starts_with("curated-"));
    assert!(cache.is_empty());

    let err = service.acquire(level(1), AcquisitionMode::UnlimitedOnly).await.unwrap_err();
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn disabled_source_is_never_called() {
    let source = Arc::new(ScriptedSource::new(&["PLANT"]));
    let settings = SourceSettings { enabled: false, ..SourceSettings::default() };
    let service = service(cache(), source.clone()).with_source_settings(settings);

    let record = service.acquire(level(3), AcquisitionMode::Hybrid).await.unwrap();
    assert!(record.id().starts_with("curated-"));
    assert!(service.acquire(level(3), AcquisitionMode::UnlimitedOnly).await.is_err());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn empty_curated_level_is_a_configuration_error() {
    let service = AcquisitionService::new(
        cache(),
        Arc::new(FailingSource::default()),
        Arc::new(small_pool()),
    );

    let err = service.acquire(level(4), AcquisitionMode::Curated).await.unwrap_err();
    assert!(matches!(err, AcquisitionError::Configuration { level } if level.get() == 4));
    assert!(!err.is_offline());

    let err = service.acquire(level(4), AcquisitionMode::Hybrid).await.unwrap_err();
    assert!(matches!(err, AcquisitionError::Configuration { .. }));
}

#[tokio::test]
async fn concurrent_acquisitions_share_one_cache() {
    let cache = cache();
    let source = Arc::new(ScriptedSource::new(&["PLANT", "STONE", "BREAD", "CLOUD"]));
    let service = Arc::new(service(Arc::clone(&cache), source));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.acquire(level(1), AcquisitionMode::Hybrid).await })
        })
        .collect();
    for task in tasks {
        let record = task.await.unwrap().unwrap();
        assert_eq!(record.difficulty(), level(1));
    }

    assert!(cache.count_for(level(1)) >= 1);
    assert_eq!(service.stats().total_served(), 16);
}
