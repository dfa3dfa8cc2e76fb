//! Shared test helpers for `wordforge-core` integration tests.
//!
//! These helpers provide in-memory stores and scripted word sources so the
//! cache and acquisition tests can focus on behaviour instead of wiring.

#![allow(dead_code)]

pub mod sources;
pub mod stores;

use wordforge_domain::{AnagramRecord, DifficultyLevel};

pub fn level(n: u8) -> DifficultyLevel {
    DifficultyLevel::new(n).expect("valid difficulty level")
}

/// A valid level-1 record with the given id
pub fn crane(id: &str) -> AnagramRecord {
    AnagramRecord::new(id, "CRANE", "NACRE", "Birds", "A wading bird", level(1))
        .expect("valid record")
}

/// A valid record for `n` with a word sized for that level
pub fn record_for_level(id: &str, n: u8) -> AnagramRecord {
    let (solution, scrambled) = match n {
        1 => ("TABLE", "BLEAT"),
        2 => ("GARDEN", "DANGER"),
        3 => ("HARVEST", "THRAVES"),
        4 => ("TELESCOPE", "SCOPETELE"),
        _ => ("THERMOMETER", "METERTHERMO"),
    };
    AnagramRecord::new(id, solution, scrambled, "Test", "hint", level(n)).expect("valid record")
}
