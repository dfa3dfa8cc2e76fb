//! Word scrambling with a quality gate

use tracing::debug;
use wordforge_domain::constants::MAX_SCRAMBLE_ATTEMPTS;
use wordforge_domain::{distinct_letter_count, is_letter_permutation};

use crate::random::RandomSource;

/// Produces scrambled renderings of solution words
///
/// A scramble is accepted when it uses exactly the letters of the input and,
/// for words with at least two distinct letters, differs from the input.
/// After `max_attempts` rejected shuffles the word is rotated left by one
/// position instead, which always satisfies both conditions.
#[derive(Debug, Clone)]
pub struct Scrambler {
    max_attempts: u32,
    rng: RandomSource,
}

impl Scrambler {
    pub fn new(max_attempts: u32, rng: RandomSource) -> Self {
        Self { max_attempts: max_attempts.max(1), rng }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Scramble `word`; always terminates
    pub fn scramble(&self, word: &str) -> String {
        let letters: Vec<char> = word.chars().collect();
        if distinct_letter_count(word) < 2 {
            return word.to_string();
        }

        for _ in 0..self.max_attempts {
            let candidate = self.shuffle(&letters);
            if is_valid_scramble(word, &candidate) {
                return candidate;
            }
        }

        debug!(
            word_len = letters.len(),
            attempts = self.max_attempts,
            "shuffle attempts exhausted, rotating"
        );
        rotate_left(&letters)
    }

    /// Fisher–Yates: for i from len-1 down to 1, swap i with uniform j in [0, i]
    fn shuffle(&self, letters: &[char]) -> String {
        let mut shuffled = letters.to_vec();
        for i in (1..shuffled.len()).rev() {
            let j = self.rng.index_through(i);
            shuffled.swap(i, j);
        }
        shuffled.into_iter().collect()
    }
}

impl Default for Scrambler {
    fn default() -> Self {
        Self::new(MAX_SCRAMBLE_ATTEMPTS, RandomSource::from_entropy())
    }
}

/// True when `candidate` is an acceptable scramble of `original`
pub fn is_valid_scramble(original: &str, candidate: &str) -> bool {
    if !is_letter_permutation(original, candidate) {
        return false;
    }
    distinct_letter_count(original) < 2 || candidate != original
}

fn rotate_left(letters: &[char]) -> String {
    let mut rotated = letters.to_vec();
    rotated.rotate_left(1);
    rotated.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrambler(seed: u64) -> Scrambler {
        Scrambler::new(MAX_SCRAMBLE_ATTEMPTS, RandomSource::seeded(seed))
    }

    #[test]
    fn scramble_is_valid_permutation() {
        let scrambler = scrambler(11);
        for word in ["CRANE", "MANGO", "TABLE", "KALEIDOSCOPE", "AB", "BANANA"] {
            for _ in 0..50 {
                let scrambled = scrambler.scramble(word);
                assert!(is_valid_scramble(word, &scrambled), "{word} -> {scrambled}");
            }
        }
    }

    #[test]
    fn single_letter_words_are_returned_unchanged() {
        let scrambler = scrambler(1);
        assert_eq!(scrambler.scramble("AAA"), "AAA");
        assert_eq!(scrambler.scramble("Z"), "Z");
        assert_eq!(scrambler.scramble(""), "");
    }

    #[test]
    fn two_letter_word_always_swaps() {
        let scrambler = scrambler(2);
        for _ in 0..20 {
            assert_eq!(scrambler.scramble("AB"), "BA");
        }
    }

    #[test]
    fn rotation_fallback_differs_from_input() {
        assert_eq!(rotate_left(&['A', 'A', 'B']), "ABA");
        assert_eq!(rotate_left(&['C', 'R', 'A', 'N', 'E']), "RANEC");
    }

    #[test]
    fn zero_attempts_is_clamped_to_one() {
        assert_eq!(Scrambler::new(0, RandomSource::seeded(0)).max_attempts(), 1);
    }

    #[test]
    fn validity_check_rejects_identity_and_foreign_letters() {
        assert!(!is_valid_scramble("TABLE", "TABLE"));
        assert!(!is_valid_scramble("TABLE", "TABLX"));
        assert!(is_valid_scramble("TABLE", "BLEAT"));
        assert!(is_valid_scramble("OO", "OO"));
    }

    #[test]
    fn seeded_scrambles_are_reproducible() {
        let a: Vec<String> = (0..5).map(|_| scrambler(42).scramble("LANTERN")).collect();
        let b: Vec<String> = (0..5).map(|_| scrambler(42).scramble("LANTERN")).collect();
        assert_eq!(a, b);
    }
}
