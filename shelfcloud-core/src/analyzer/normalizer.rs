//! Subject field normalizers.
//!
//! Turns a raw, nullable field value into a cleaned string ready for
//! frequency counting. Two rule sets exist, selected by
//! [`NormalizerVersion`]:
//!
//! - **V1**: lowercase, hyphens and spaces folded into `_`, punctuation
//!   stripped (except `;`), `"; "`-separated groups split back into tokens,
//!   stop words and repeated tokens dropped
//! - **V2**: lowercase, spaces and parentheses turned into `-`, then hyphen
//!   runs rewritten to `_`
//!
//! ## Word characters
//!
//! V1 keeps a character when `char::is_alphanumeric` holds, when it is `_`,
//! when it is Unicode whitespace, or when it is `;`. Letters and digits of
//! any script survive (`"Ελληνικά"` stays intact); symbols, emoji and all
//! other punctuation are removed.
//!
//! Whitespace means `char::is_whitespace`, which excludes the information
//! separators U+001C..U+001F. Those are stripped as punctuation rather than
//! splitting tokens, so `"a\x1cb"` cleans to `ab`.
//!
//! ## Groups
//!
//! Step 5 of V1 rewrites every space to `_`, so a phrase like
//! `"Music History"` becomes the single token `music_history`. Only the
//! `"; "` separator of multi-subject fields (`;_` after that rewrite) splits
//! a field back into several tokens. Stop-word and duplicate removal
//! therefore act on whole groups.
//!
//! # Examples
//!
//! ```
//! use shelfcloud_core::analyzer::{StopWords, TextNormalizer};
//! use shelfcloud_types::NormalizerVersion;
//!
//! let stop_words = StopWords::default();
//! let v1 = TextNormalizer::new(NormalizerVersion::V1, &stop_words);
//! assert_eq!(v1.normalize(Some("Economics; Finance; Banking")), "economics finance banking");
//!
//! let v2 = TextNormalizer::new(NormalizerVersion::V2, &stop_words);
//! assert_eq!(v2.normalize(Some("Modern (Art) History")), "modern_art_history");
//! ```

use memchr::memmem::Finder;
use rustc_hash::FxHashSet;
use shelfcloud_types::NormalizerVersion;

use super::stopwords::StopWords;

#[inline(always)]
fn is_kept_v1(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ';' || c.is_whitespace()
}

/// Writes `src` into `out` with every non-overlapping occurrence of the
/// finder's needle, scanned left to right, replaced by `replacement`.
///
/// Needles are ASCII, so match offsets always fall on char boundaries.
fn replace_into(src: &str, finder: &Finder<'_>, replacement: &str, out: &mut String) {
    out.clear();
    out.reserve(src.len());

    let needle_len = finder.needle().len();
    let mut last = 0usize;

    for at in finder.find_iter(src.as_bytes()) {
        out.push_str(&src[last..at]);
        out.push_str(replacement);
        last = at + needle_len;
    }

    out.push_str(&src[last..]);
}

/// Field normalizer bound to one rule set.
///
/// Borrows the process-wide [`StopWords`] instead of copying them per call.
/// V2 never consults the stop words.
#[derive(Debug, Clone)]
pub struct TextNormalizer<'s> {
    version: NormalizerVersion,
    stop_words: &'s StopWords,
    double_hyphen: Finder<'static>,
    group_separator: Finder<'static>,
    spaced_underscore: Finder<'static>,
}

impl<'s> TextNormalizer<'s> {
    /// Creates a normalizer for `version`.
    pub fn new(version: NormalizerVersion, stop_words: &'s StopWords) -> Self {
        Self {
            version,
            stop_words,
            double_hyphen: Finder::new("--"),
            group_separator: Finder::new(";_"),
            spaced_underscore: Finder::new(" _"),
        }
    }

    /// The rule set this normalizer applies.
    #[inline]
    pub fn version(&self) -> NormalizerVersion {
        self.version
    }

    /// Normalizes a field value into an existing buffer.
    ///
    /// Clears `out` first. A missing value leaves `out` empty.
    pub fn normalize_into(&self, input: Option<&str>, out: &mut String) {
        out.clear();

        let Some(raw) = input else {
            return;
        };

        match self.version {
            NormalizerVersion::V1 => self.clean_v1_into(raw, out),
            NormalizerVersion::V2 => self.clean_v2_into(raw, out),
        }
    }

    /// Normalizes a field value and returns a new String.
    #[inline]
    pub fn normalize(&self, input: Option<&str>) -> String {
        let mut out = String::with_capacity(input.map_or(0, str::len));
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes every value yielded by a field accessor.
    pub fn normalize_all<'a, I>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        values.into_iter().map(|v| self.normalize(v)).collect()
    }

    /// Normalizes every value and joins the results with single spaces.
    ///
    /// Values that clean to nothing still contribute a separator, so the
    /// result may contain runs of spaces; consumers split on whitespace.
    pub fn join_cleaned<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut joined = String::new();
        let mut buf = String::new();

        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                joined.push(' ');
            }
            self.normalize_into(value, &mut buf);
            joined.push_str(&buf);
        }

        joined
    }

    fn clean_v1_into(&self, raw: &str, out: &mut String) {
        let lowered = raw.to_lowercase();

        let mut buf = String::with_capacity(lowered.len());
        replace_into(&lowered, &self.double_hyphen, " ", &mut buf);

        // A hyphen left over becomes a space, and every space becomes `_`.
        let joined: String = buf
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        let stripped: String = joined.trim().chars().filter(|&c| is_kept_v1(c)).collect();

        replace_into(&stripped, &self.group_separator, " ", &mut buf);

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for token in buf.split_whitespace() {
            if self.stop_words.contains(token) || !seen.insert(token) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
    }

    fn clean_v2_into(&self, raw: &str, out: &mut String) {
        let dashed: String = raw
            .to_lowercase()
            .chars()
            .map(|c| match c {
                ' ' | '(' | ')' => '-',
                other => other,
            })
            .collect();

        // Two passes: `--` first, then whatever single hyphens remain.
        let mut buf = String::with_capacity(dashed.len());
        replace_into(&dashed, &self.double_hyphen, "_", &mut buf);
        let underscored: String = buf
            .chars()
            .map(|c| if c == '-' { '_' } else { c })
            .collect();

        // Cannot match once spaces became hyphens; kept so the rule set stays complete.
        replace_into(&underscored, &self.spaced_underscore, " ", out);
    }
}

/// Cleans a field value with the V1 rule set.
pub fn clean_v1(input: Option<&str>, stop_words: &StopWords) -> String {
    TextNormalizer::new(NormalizerVersion::V1, stop_words).normalize(input)
}

/// Cleans a field value with the V2 rule set.
pub fn clean_v2(input: Option<&str>) -> String {
    TextNormalizer::new(NormalizerVersion::V2, &StopWords::empty()).normalize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1(input: &str) -> String {
        clean_v1(Some(input), &StopWords::default())
    }

    fn v2(input: &str) -> String {
        clean_v2(Some(input))
    }

    #[test]
    fn v1_missing_and_empty() {
        assert_eq!(clean_v1(None, &StopWords::default()), "");
        assert_eq!(v1(""), "");
        assert_eq!(v1("\t\n"), "");
    }

    #[test]
    fn v1_information_separators_are_stripped() {
        assert_eq!(v1("a\x1cb"), "ab");
        assert_eq!(v1("a\x1fb; c"), "ab c");
    }

    #[test]
    fn v1_spaces_become_underscores_before_trim() {
        // Step order: spaces are rewritten to `_` before the trim runs.
        assert_eq!(v1("   "), "___");
    }

    #[test]
    fn v1_phrase_becomes_one_group() {
        assert_eq!(
            v1("The Music--History and Theory"),
            "the_music_history_and_theory"
        );
    }

    #[test]
    fn v1_semicolon_splits_groups() {
        assert_eq!(v1("Economics; Finance; Banking"), "economics finance banking");
    }

    #[test]
    fn v1_groups_keep_internal_underscores() {
        assert_eq!(
            v1("United States -- History -- Civil War, 1861-1865; Slavery."),
            "united_states___history___civil_war_1861_1865 slavery"
        );
    }

    #[test]
    fn v1_duplicates_keep_first_occurrence() {
        assert_eq!(v1("piano; piano; violin"), "piano violin");
        assert_eq!(v1("Jazz; jazz; JAZZ"), "jazz");
        assert_eq!(v1("violin; piano; violin; cello"), "violin piano cello");
    }

    #[test]
    fn v1_repeated_words_in_one_phrase_stay_joined() {
        assert_eq!(v1("piano piano violin"), "piano_piano_violin");
    }

    #[test]
    fn v1_stop_word_groups_removed() {
        assert_eq!(v1("The; Music; and; History"), "music history");
    }

    #[test]
    fn v1_all_stop_words_yield_empty() {
        assert_eq!(v1("the; and; of"), "");
    }

    #[test]
    fn v1_spaced_double_hyphen() {
        assert_eq!(v1("Music -- History"), "music___history");
    }

    #[test]
    fn v1_punctuation_stripped() {
        assert_eq!(
            v1("Women's studies, 19th century."),
            "womens_studies_19th_century"
        );
    }

    #[test]
    fn v1_bare_semicolon_is_kept() {
        assert_eq!(v1("a;b"), "a;b");
        assert_eq!(v1("Music; "), "music");
    }

    #[test]
    fn v1_other_whitespace_separates_tokens() {
        assert_eq!(v1("music\thistory"), "music history");
        assert_eq!(v1("music\nhistory"), "music history");
    }

    #[test]
    fn v1_unicode_letters_survive() {
        assert_eq!(v1("Café; Ελληνικά"), "café ελληνικά");
        assert_eq!(v1("ПРИВЕТ; мир"), "привет мир");
    }

    #[test]
    fn v1_symbols_and_emoji_removed() {
        assert_eq!(v1("music 🎵"), "music_");
        assert_eq!(v1("!!!"), "");
        assert_eq!(v1("c++; c#"), "c");
    }

    #[test]
    fn v1_output_has_no_stray_whitespace() {
        let samples = [
            "  Music; History  ",
            "\tEconomics;\nFinance ",
            "a; ; b",
            "; ; ;",
        ];

        for s in samples {
            let out = v1(s);
            assert_eq!(out, out.trim());
            assert!(!out.contains("  "), "double space in {out:?}");
            assert!(out.split(' ').all(|t| !t.is_empty()) || out.is_empty());
        }
    }

    #[test]
    fn v1_tokens_are_fixed_points() {
        let stop = StopWords::default();
        let samples = [
            "Economics; Finance; Banking",
            "United States -- History -- Civil War, 1861-1865; Slavery.",
            "Women's studies, 19th century.; Feminism",
            "Café; Ελληνικά; a;b",
        ];

        for s in samples {
            for token in clean_v1(Some(s), &stop).split(' ') {
                assert_eq!(clean_v1(Some(token), &stop), token);
            }
        }
    }

    #[test]
    fn v1_single_group_output_is_idempotent() {
        let stop = StopWords::default();
        for s in ["The Music--History and Theory", "Music -- History", "piano piano violin"] {
            let once = clean_v1(Some(s), &stop);
            let twice = clean_v1(Some(&once), &stop);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn v1_custom_stop_words() {
        let stop = StopWords::from_list(&["music"]);
        assert_eq!(clean_v1(Some("Music; The"), &stop), "the");
    }

    #[test]
    fn v2_missing_and_empty() {
        assert_eq!(clean_v2(None), "");
        assert_eq!(v2(""), "");
    }

    #[test]
    fn v2_parentheses_and_spaces() {
        assert_eq!(v2("Modern (Art) History"), "modern_art_history");
    }

    #[test]
    fn v2_double_space_collapses_once() {
        assert_eq!(v2("a b"), "a_b");
        assert_eq!(v2("A  B"), "a_b");
    }

    #[test]
    fn v2_two_phase_hyphen_rewrite() {
        assert_eq!(v2("a---b"), "a__b");
        assert_eq!(v2("x - y"), "x__y");
        assert_eq!(v2("a----b"), "a__b");
    }

    #[test]
    fn v2_keeps_edge_artifacts() {
        assert_eq!(v2("(Art)"), "_art_");
        assert_eq!(v2(" Art "), "_art_");
    }

    #[test]
    fn v2_keeps_stop_words_and_duplicates() {
        assert_eq!(v2("The Art"), "the_art");
        assert_eq!(v2("art art"), "art_art");
    }

    #[test]
    fn v2_spaced_underscore_rule_never_fires() {
        assert_eq!(v2("a _b"), "a__b");
    }

    #[test]
    fn v2_other_whitespace_untouched() {
        assert_eq!(v2("a\t(b)"), "a\t_b_");
    }

    #[test]
    fn v2_keeps_punctuation() {
        assert_eq!(v2("Art, 1900-1950."), "art,_1900_1950.");
    }

    #[test]
    fn both_variants_are_total() {
        let stop = StopWords::default();
        let inputs = [
            "",
            "-",
            "--",
            ";_",
            " _",
            "İstanbul",
            "ΟΔΟΣ",
            "\u{200B}",
            "a\0b",
            "🌍🌍",
            "((()))",
            "; ; ; ;",
        ];

        for input in inputs {
            let _ = clean_v1(Some(input), &stop);
            let _ = clean_v2(Some(input));
        }
    }

    #[test]
    fn final_sigma_lowercased_in_context() {
        assert_eq!(v2("ΟΔΟΣ"), "οδος");
    }

    #[test]
    fn normalize_into_reuses_buffer() {
        let stop = StopWords::default();
        let n = TextNormalizer::new(NormalizerVersion::V1, &stop);
        let mut buf = String::with_capacity(64);

        n.normalize_into(Some("Economics; Finance"), &mut buf);
        assert_eq!(buf, "economics finance");

        n.normalize_into(None, &mut buf);
        assert_eq!(buf, "");
    }

    #[test]
    fn version_is_reported() {
        let stop = StopWords::default();
        assert_eq!(
            TextNormalizer::new(NormalizerVersion::V2, &stop).version(),
            NormalizerVersion::V2
        );
    }

    #[test]
    fn normalize_all_maps_each_value() {
        let stop = StopWords::default();
        let n = TextNormalizer::new(NormalizerVersion::V1, &stop);
        let out = n.normalize_all([Some("Music; Piano"), None, Some("the")]);
        assert_eq!(out, vec!["music piano".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn join_cleaned_keeps_empty_slots() {
        let stop = StopWords::default();
        let n = TextNormalizer::new(NormalizerVersion::V1, &stop);
        let joined = n.join_cleaned([Some("Music"), None, Some("Piano")]);
        assert_eq!(joined, "music  piano");
        assert_eq!(joined.split_whitespace().count(), 2);
    }

    #[test]
    fn replace_into_is_non_overlapping() {
        let finder = Finder::new("--");
        let mut out = String::new();
        replace_into("a---b", &finder, "_", &mut out);
        assert_eq!(out, "a_-b");
        replace_into("é--ü", &finder, " ", &mut out);
        assert_eq!(out, "é ü");
    }
}
