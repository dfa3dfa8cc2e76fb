//! Curated word pool: the tier of last resort
//!
//! The builtin pool carries at least eight words per difficulty level, each
//! fitting that level's length band, so the fallback never runs dry on a
//! correctly built binary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wordforge_domain::constants::CURATED_ID_PREFIX;
use wordforge_domain::{validate_solution, AnagramRecord, DifficultyLevel, Result};

use super::scrambler::Scrambler;
use crate::acquisition::AcquisitionError;

/// One curated puzzle word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedWord {
    pub word: String,
    pub category: String,
    pub hint: String,
}

impl CuratedWord {
    pub fn new(word: &str, category: &str, hint: &str) -> Self {
        Self { word: word.to_string(), category: category.to_string(), hint: hint.to_string() }
    }
}

/// Static mapping from difficulty level to curated words
#[derive(Debug, Clone, Default)]
pub struct CuratedPool {
    levels: BTreeMap<DifficultyLevel, Vec<CuratedWord>>,
}

impl CuratedPool {
    /// Build a pool from explicit entries
    ///
    /// # Errors
    /// Returns `WordForgeError::InvalidInput` if any word is not 3–15
    /// uppercase letters.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DifficultyLevel, CuratedWord)>,
    {
        let mut levels: BTreeMap<DifficultyLevel, Vec<CuratedWord>> = BTreeMap::new();
        for (level, word) in entries {
            validate_solution(&word.word)?;
            levels.entry(level).or_default().push(word);
        }
        Ok(Self { levels })
    }

    /// The pool shipped with the binary
    pub fn builtin() -> Self {
        let levels = BUILTIN
            .iter()
            .filter_map(|(level, words)| {
                let level = DifficultyLevel::new(*level).ok()?;
                let words = words
                    .iter()
                    .map(|(word, category, hint)| CuratedWord::new(word, category, hint))
                    .collect();
                Some((level, words))
            })
            .collect();
        Self { levels }
    }

    /// Words for `level`; empty if the level has none
    pub fn by_difficulty(&self, level: DifficultyLevel) -> &[CuratedWord] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of words across all levels
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every difficulty level has at least one word
    ///
    /// # Errors
    /// Returns `AcquisitionError::Configuration` for the first empty level.
    pub fn ensure_complete(&self) -> std::result::Result<(), AcquisitionError> {
        match DifficultyLevel::all().find(|level| self.by_difficulty(*level).is_empty()) {
            Some(level) => Err(AcquisitionError::Configuration { level }),
            None => Ok(()),
        }
    }

    /// Turn a curated word into a freshly scrambled record
    ///
    /// Curated ids are stable (`curated-{level}-{WORD}`), so the same word
    /// always maps to the same record identity.
    pub fn record_for(
        &self,
        level: DifficultyLevel,
        word: &CuratedWord,
        scrambler: &Scrambler,
    ) -> Result<AnagramRecord> {
        AnagramRecord::new(
            format!("{CURATED_ID_PREFIX}-{level}-{}", word.word),
            word.word.clone(),
            scrambler.scramble(&word.word),
            word.category.clone(),
            word.hint.clone(),
            level,
        )
    }
}

type BuiltinLevel = (u8, &'static [(&'static str, &'static str, &'static str)]);

const BUILTIN: &[BuiltinLevel] = &[
    (
        1,
        &[
            ("CRANE", "Birds", "A long-necked wading bird"),
            ("MANGO", "Fruit", "Tropical stone fruit"),
            ("TABLE", "Furniture", "You eat at it"),
            ("RIVER", "Nature", "Flows to the sea"),
            ("STONE", "Nature", "A small rock"),
            ("BREAD", "Food", "Baked from dough"),
            ("CLOUD", "Weather", "Floats in the sky"),
            ("FROG", "Animals", "Green and hops"),
            ("LAMP", "Household", "Lights a room"),
        ],
    ),
    (
        2,
        &[
            ("GARDEN", "Places", "Where flowers grow"),
            ("CASTLE", "Buildings", "Home of a medieval king"),
            ("PLANET", "Space", "Orbits a star"),
            ("BRIDGE", "Structures", "Crosses a river"),
            ("WINTER", "Seasons", "The coldest season"),
            ("BASKET", "Household", "Woven container"),
            ("CANDLE", "Household", "Wax and a wick"),
            ("DOLPHIN", "Animals", "Clever marine mammal"),
            ("LANTERN", "Household", "Portable light"),
        ],
    ),
    (
        3,
        &[
            ("HARVEST", "Farming", "Gathering the crops"),
            ("CHIMNEY", "Buildings", "Smoke leaves through it"),
            ("BLANKET", "Household", "Keeps you warm in bed"),
            ("COMPASS", "Tools", "Points north"),
            ("JOURNEY", "Travel", "A long trip"),
            ("MOUNTAIN", "Nature", "Higher than a hill"),
            ("VOLCANO", "Nature", "Erupts with lava"),
            ("LIBRARY", "Places", "Borrow books here"),
            ("ELEPHANT", "Animals", "Has a trunk"),
        ],
    ),
    (
        4,
        &[
            ("TELESCOPE", "Science", "Brings the stars closer"),
            ("ALGORITHM", "Computing", "Step-by-step procedure"),
            ("HURRICANE", "Weather", "Violent tropical storm"),
            ("PINEAPPLE", "Fruit", "Spiky tropical fruit"),
            ("CROCODILE", "Animals", "Large river reptile"),
            ("BLUEPRINT", "Design", "Technical drawing of a plan"),
            ("LABYRINTH", "Places", "Maze with one path"),
            ("MICROSCOPE", "Science", "Makes tiny things visible"),
            ("SYMPHONY", "Music", "Work for a full orchestra"),
        ],
    ),
    (
        5,
        &[
            ("THERMOMETER", "Science", "Measures temperature"),
            ("HELICOPTER", "Transport", "Flies with rotating blades"),
            ("CHAMPIONSHIP", "Sport", "Contest for the title"),
            ("TRANSPARENT", "Descriptions", "You can see through it"),
            ("WATERMELON", "Fruit", "Green outside, red inside"),
            ("BLACKSMITH", "Occupations", "Works iron at a forge"),
            ("LIGHTHOUSE", "Buildings", "Guides ships at night"),
            ("ARCHITECTURE", "Design", "The art of buildings"),
            ("KALEIDOSCOPE", "Toys", "Tube of shifting patterns"),
        ],
    ),
];
