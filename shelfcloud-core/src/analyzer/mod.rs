//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **StopWords**: Immutable closed-class word set for V1
//! - **Normalizer**: Cleans raw subject fields (V1 or V2 rule set)
//! - **Tokenizer**: Splits cleaned text into tokens for counting

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{clean_v1, clean_v2, TextNormalizer};
pub use stopwords::{StopWords, DEFAULT_STOP_WORDS};
pub use tokenizer::Tokenizer;
