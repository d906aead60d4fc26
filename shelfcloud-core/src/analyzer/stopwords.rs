//! Stop-word set used by the V1 normalizer.

use rustc_hash::FxHashSet;

/// Closed-class words dropped from V1 output.
///
/// `"s"` and `"t"` cover contraction fragments left behind once apostrophes
/// are stripped.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "because", "as", "what", "which", "when", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
    "don", "should", "now", "in", "of",
];

/// Immutable set of stop words.
///
/// Built once at startup and lent to every [`TextNormalizer`] by reference.
/// Entries are stored lowercase and membership is case-insensitive.
///
/// [`TextNormalizer`]: super::TextNormalizer
#[derive(Debug, Clone)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_list(DEFAULT_STOP_WORDS)
    }
}

impl StopWords {
    /// Builds a set from a custom word list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Creates an empty set (filters nothing).
    pub fn empty() -> Self {
        Self {
            words: FxHashSet::default(),
        }
    }

    /// Returns `true` if `token` is a stop word.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        if token.chars().any(char::is_uppercase) {
            self.words.contains(&token.to_lowercase())
        } else {
            self.words.contains(token)
        }
    }

    /// Number of distinct stop words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
