//! Streaming tokenizer for cleaned text.
//!
//! Splits the space-joined concatenation of cleaned field values into the
//! token multiset the renderer counts. Tokens are emitted through a
//! callback with their position:
//!
//! ```ignore
//! ("economics", 0)
//! ("finance", 1)
//! ("banking", 2)
//! ```
//!
//! ## Key Features
//!
//! - **Zero Allocation**: tokens are slices of the input, not new Strings
//! - **Streaming**: a callback receives each token, nothing is collected
//! - **Tolerant**: empty cleaned values leave runs of spaces behind when
//!   joined; runs of any Unicode whitespace count as one separator
//!
//! ## Usage
//!
//! ```
//! use shelfcloud_core::analyzer::Tokenizer;
//!
//! let mut count = 0;
//! Tokenizer::new().tokenize("music  piano violin", |_text, _pos| count += 1);
//! assert_eq!(count, 3);
//! ```

/// Whitespace tokenizer over cleaned text.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes `cleaned` and emits `(text, position)` for each token.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop.
    #[inline]
    pub fn tokenize<'n, F>(&self, cleaned: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let mut pos = 0u32;

        for text in cleaned.split_whitespace() {
            emit(text, pos);
            if pos == u32::MAX {
                return;
            }
            pos += 1;
        }
    }

    /// Counts tokens without emitting them.
    #[inline]
    pub fn count(&self, cleaned: &str) -> usize {
        let mut n = 0usize;
        self.tokenize(cleaned, |_, _| n += 1);
        n
    }
}
