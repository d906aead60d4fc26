//! Term frequency counting over cleaned text.

use core::cmp::Reverse;

use rustc_hash::FxHashMap;

use crate::analyzer::Tokenizer;

/// A term and the number of times it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCount<'t> {
    /// The token text, borrowed from the counted input.
    pub term: &'t str,
    /// Number of occurrences.
    pub count: u32,
}

/// Token multiset derived from cleaned text by whitespace splitting.
///
/// Each entry remembers the position of its first occurrence so rankings
/// with equal counts stay in reading order.
#[derive(Debug, Default, Clone)]
pub struct TermFrequencies<'t> {
    counts: FxHashMap<&'t str, (u32, u32)>,
    total: u64,
}

impl<'t> TermFrequencies<'t> {
    /// Counts every whitespace-delimited token in `text`.
    pub fn from_text(text: &'t str) -> Self {
        let mut freqs = Self::default();

        Tokenizer::new().tokenize(text, |term, pos| {
            let entry = freqs.counts.entry(term).or_insert((0, pos));
            entry.0 = entry.0.saturating_add(1);
            freqs.total += 1;
        });

        freqs
    }

    /// Occurrences of `term` (0 when absent).
    #[inline]
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).map_or(0, |&(count, _)| count)
    }

    /// Number of distinct terms.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of tokens counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` if no token was counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `limit` most frequent terms, by count descending then first
    /// occurrence.
    pub fn top(&self, limit: usize) -> Vec<TermCount<'t>> {
        let mut ranked: Vec<(&'t str, u32, u32)> = self
            .counts
            .iter()
            .map(|(&term, &(count, first))| (term, count, first))
            .collect();

        ranked.sort_unstable_by_key(|&(_, count, first)| (Reverse(count), first));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(term, count, _)| TermCount { term, count })
            .collect()
    }
}
