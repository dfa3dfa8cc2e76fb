/// Datamuse API response types
use serde::{Deserialize, Serialize};

/// One row of a `/words` response
///
/// With `md=f` the API adds a frequency tag such as `"f:24.5"`, the number
/// of occurrences per million words of English text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatamuseWord {
    pub word: String,
    #[serde(default)]
    pub score: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DatamuseWord {
    /// Frequency per million words, if the response carried one
    pub fn frequency(&self) -> Option<f64> {
        self.tags.iter().find_map(|tag| tag.strip_prefix("f:")?.parse::<f64>().ok())
    }

    /// True for single words made only of ASCII letters
    pub fn is_plain_word(&self) -> bool {
        !self.word.is_empty() && self.word.bytes().all(|b| b.is_ascii_alphabetic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frequency_tag() {
        let row: DatamuseWord =
            serde_json::from_str(r#"{"word":"crane","score":1,"tags":["f:12.75"]}"#).unwrap();
        assert_eq!(row.frequency(), Some(12.75));
        assert!(row.is_plain_word());
    }

    #[test]
    fn missing_or_bad_tags_have_no_frequency() {
        let bare: DatamuseWord = serde_json::from_str(r#"{"word":"crane"}"#).unwrap();
        assert_eq!(bare.frequency(), None);

        let odd: DatamuseWord =
            serde_json::from_str(r#"{"word":"ice age","tags":["n","f:abc"]}"#).unwrap();
        assert_eq!(odd.frequency(), None);
        assert!(!odd.is_plain_word());
    }
}
