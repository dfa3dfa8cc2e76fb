//! Domain types and models

pub mod anagram;
pub mod difficulty;
pub mod mode;

pub use anagram::{
    distinct_letter_count, is_letter_permutation, validate_solution, AnagramRecord, CacheKey,
};
pub use difficulty::{DifficultyLevel, LengthBand};
pub use mode::AcquisitionMode;
