//! Puzzle construction: scrambling words and the curated fallback pool

pub mod curated;
pub mod scrambler;

pub use curated::{CuratedPool, CuratedWord};
pub use scrambler::{is_valid_scramble, Scrambler};
