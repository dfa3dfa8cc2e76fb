//! Difficulty levels and the word-length band each one maps to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::errors::{Result, WordForgeError};

/// Puzzle difficulty, always within `1..=5`
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    /// Create a level, rejecting values outside `1..=5`
    pub fn new(level: u8) -> Result<Self> {
        if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
            Ok(Self(level))
        } else {
            Err(WordForgeError::InvalidInput(format!(
                "difficulty level must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, \
                 got {level}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid level in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (MIN_DIFFICULTY..=MAX_DIFFICULTY).map(Self)
    }

    /// Inclusive solution length range for words fetched at this level
    ///
    /// | Level | Letters |
    /// |-------|---------|
    /// | 1     | 4–5     |
    /// | 2     | 5–7     |
    /// | 3     | 6–8     |
    /// | 4     | 8–10    |
    /// | 5     | 10–12   |
    pub fn length_band(self) -> LengthBand {
        match self.0 {
            1 => LengthBand::new(4, 5),
            2 => LengthBand::new(5, 7),
            3 => LengthBand::new(6, 8),
            4 => LengthBand::new(8, 10),
            _ => LengthBand::new(10, 12),
        }
    }
}

impl TryFrom<u8> for DifficultyLevel {
    type Error = WordForgeError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.0
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DifficultyLevel {
    type Err = WordForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().parse::<u8>().map_err(|_| {
            WordForgeError::InvalidInput(format!("difficulty level is not a number: {s}"))
        })?;
        Self::new(value)
    }
}

/// Inclusive range of solution lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBand {
    pub min: usize,
    pub max: usize,
}

impl LengthBand {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}
