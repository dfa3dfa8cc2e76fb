//! Anagram puzzle records and their cache identity

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyLevel;
use crate::constants::{MAX_SOLUTION_LENGTH, MIN_SOLUTION_LENGTH};
use crate::errors::{Result, WordForgeError};

/// A playable puzzle: a solution word and one scrambled rendering of it
///
/// Records are validated on construction and on deserialization, and cannot
/// be modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct AnagramRecord {
    id: String,
    solution: String,
    scrambled: String,
    category: String,
    hint: String,
    difficulty: DifficultyLevel,
}

/// Unvalidated wire shape of [`AnagramRecord`]
#[derive(Deserialize)]
struct RecordFields {
    id: String,
    solution: String,
    scrambled: String,
    category: String,
    hint: String,
    difficulty: DifficultyLevel,
}

impl TryFrom<RecordFields> for AnagramRecord {
    type Error = WordForgeError;

    fn try_from(fields: RecordFields) -> Result<Self> {
        let record = Self {
            id: fields.id,
            solution: fields.solution,
            scrambled: fields.scrambled,
            category: fields.category,
            hint: fields.hint,
            difficulty: fields.difficulty,
        };
        record.validate()?;
        Ok(record)
    }
}

impl AnagramRecord {
    /// Build a record, checking the solution shape and the scramble
    ///
    /// # Errors
    /// Returns `WordForgeError::InvalidInput` when:
    /// - `id` is blank
    /// - `solution` is not 3–15 uppercase ASCII letters
    /// - `scrambled` is not a permutation of `solution`
    /// - `scrambled` equals `solution` although it has two or more distinct
    ///   letters
    pub fn new(
        id: impl Into<String>,
        solution: impl Into<String>,
        scrambled: impl Into<String>,
        category: impl Into<String>,
        hint: impl Into<String>,
        difficulty: DifficultyLevel,
    ) -> Result<Self> {
        let record = Self {
            id: id.into(),
            solution: solution.into(),
            scrambled: scrambled.into(),
            category: category.into(),
            hint: hint.into(),
            difficulty,
        };
        record.validate()?;
        Ok(record)
    }

    /// Re-check every construction invariant
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("record id must not be blank"));
        }

        validate_solution(&self.solution)?;

        if !is_letter_permutation(&self.solution, &self.scrambled) {
            return Err(invalid(format!(
                "scrambled form '{}' is not a permutation of '{}'",
                self.scrambled, self.solution
            )));
        }

        if distinct_letter_count(&self.solution) >= 2 && self.scrambled == self.solution {
            return Err(invalid(format!("scrambled form of '{}' is unchanged", self.solution)));
        }

        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    /// Cache identity of this record
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.difficulty, self.id.clone())
    }
}

/// Check that `solution` is 3–15 uppercase ASCII letters
pub fn validate_solution(solution: &str) -> Result<()> {
    let len = solution.len();
    if !(MIN_SOLUTION_LENGTH..=MAX_SOLUTION_LENGTH).contains(&len) {
        return Err(invalid(format!(
            "solution must have {MIN_SOLUTION_LENGTH}-{MAX_SOLUTION_LENGTH} letters, got {len}"
        )));
    }
    if !solution.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(invalid(format!("solution '{solution}' must be uppercase A-Z only")));
    }
    Ok(())
}

/// True when both strings hold exactly the same characters
pub fn is_letter_permutation(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left: Vec<char> = a.chars().collect();
    let mut right: Vec<char> = b.chars().collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

/// Number of distinct characters in `word`
pub fn distinct_letter_count(word: &str) -> usize {
    word.chars().collect::<HashSet<_>>().len()
}

fn invalid(message: impl Into<String>) -> WordForgeError {
    WordForgeError::InvalidInput(message.into())
}

/// Cache identity: (difficulty level, record id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub difficulty: DifficultyLevel,
    pub id: String,
}

impl CacheKey {
    pub fn new(difficulty: DifficultyLevel, id: impl Into<String>) -> Self {
        Self { difficulty, id: id.into() }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.difficulty, self.id)
    }
}
