//! Persisted snapshot format
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-01-01T12:00:00Z",
//!   "entries": [
//!     {
//!       "difficulty": 1,
//!       "record": { "id": "src-…", "solution": "CRANE", … },
//!       "inserted_at": 1767268800000,
//!       "last_accessed_at": 1767268800000,
//!       "access_count": 0
//!     }
//!   ]
//! }
//! ```
//!
//! Timestamps are milliseconds since the UNIX epoch. Hit/miss/eviction
//! counters are never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use wordforge_common::EntryRecord;
use wordforge_domain::constants::SNAPSHOT_VERSION;
use wordforge_domain::{AnagramRecord, CacheKey, DifficultyLevel};

/// One cache entry as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub difficulty: DifficultyLevel,
    pub record: AnagramRecord,
    pub inserted_at: u64,
    pub last_accessed_at: u64,
    pub access_count: u64,
}

impl From<EntryRecord<CacheKey, AnagramRecord>> for SnapshotEntry {
    fn from(entry: EntryRecord<CacheKey, AnagramRecord>) -> Self {
        Self {
            difficulty: entry.key.difficulty,
            record: entry.value,
            inserted_at: entry.inserted_at,
            last_accessed_at: entry.last_accessed,
            access_count: entry.access_count,
        }
    }
}

impl From<SnapshotEntry> for EntryRecord<CacheKey, AnagramRecord> {
    fn from(entry: SnapshotEntry) -> Self {
        Self {
            key: CacheKey::new(entry.difficulty, entry.record.id()),
            value: entry.record,
            inserted_at: entry.inserted_at,
            last_accessed: entry.last_accessed_at,
            access_count: entry.access_count,
        }
    }
}

#[derive(Serialize)]
struct SnapshotDocument {
    version: u32,
    saved_at: DateTime<Utc>,
    entries: Vec<SnapshotEntry>,
}

/// Outer shape only; entries are decoded one at a time
#[derive(Deserialize)]
struct RawSnapshot {
    version: u32,
    entries: Vec<serde_json::Value>,
}

/// Why a stored snapshot was discarded
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Result of decoding a snapshot
#[derive(Debug, Default)]
pub struct DecodedSnapshot {
    pub entries: Vec<SnapshotEntry>,
    /// Entries dropped because they failed validation
    pub skipped: usize,
}

/// Serialize cache entries into a snapshot document
pub fn encode(
    entries: Vec<EntryRecord<CacheKey, AnagramRecord>>,
    saved_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let document = SnapshotDocument {
        version: SNAPSHOT_VERSION,
        saved_at,
        entries: entries.into_iter().map(SnapshotEntry::from).collect(),
    };
    serde_json::to_string(&document)
}

/// Parse a snapshot document
///
/// # Errors
/// Fails when the document is not JSON, lacks `version`/`entries`, or has
/// an unknown version. Individual invalid entries are skipped and counted
/// instead.
pub fn decode(raw: &str) -> Result<DecodedSnapshot, SnapshotError> {
    let snapshot: RawSnapshot = serde_json::from_str(raw)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let mut decoded = DecodedSnapshot::default();
    for (index, value) in snapshot.entries.into_iter().enumerate() {
        match serde_json::from_value::<SnapshotEntry>(value) {
            Ok(entry) => decoded.entries.push(entry),
            Err(error) => {
                warn!(index, %error, "skipping invalid snapshot entry");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}
