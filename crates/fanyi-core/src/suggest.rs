//! Fuzzy suggestion index over one translation direction.
//!
//! Built once from a `PhraseBook` and queried read-only. Each source
//! phrase is scored against the input with several signals and the best
//! one wins:
//!
//! - exact match (case-insensitive): 1.0
//! - whole-string similarity: normalized Levenshtein over the full key
//! - prefix: `0.6 + 0.35 * coverage` when the key starts with the input,
//!   where coverage is input chars over key chars (a full prefix stays
//!   below an exact match)
//! - token: best per-token similarity, damped by 0.8 so a single matching
//!   word cannot outrank a whole-string match
//!
//! Results at or above the threshold are sorted by score descending with
//! a stable sort, so equal scores keep the dictionary's insertion order.

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use crate::dictionary::{Language, PhraseBook};

pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_LIMIT: usize = 5;

const PREFIX_BASE: f64 = 0.6;
const PREFIX_SPAN: f64 = 0.35;
const TOKEN_WEIGHT: f64 = 0.8;

/// One ranked match: the source phrase and its translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub translation: String,
    pub score: f64,
}

struct IndexItem {
    text: String,
    translation: String,
    text_lower: String,
}

/// Immutable fuzzy-match index for one direction of a `PhraseBook`.
pub struct SuggestionIndex {
    source: Language,
    items: Vec<IndexItem>,
    threshold: f64,
}

impl SuggestionIndex {
    pub fn build(book: &PhraseBook, source: Language) -> Self {
        Self::with_threshold(book, source, DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(book: &PhraseBook, source: Language, threshold: f64) -> Self {
        let items = book
            .map_for(source)
            .iter()
            .map(|(text, translation)| IndexItem {
                text: text.to_string(),
                translation: translation.to_string(),
                text_lower: text.to_lowercase(),
            })
            .collect();
        Self {
            source,
            items,
            threshold,
        }
    }

    /// The direction this index was built for.
    pub fn source(&self) -> Language {
        self.source
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top matches for `input`, at most `limit`. Blank input or a zero
    /// limit yields nothing.
    pub fn query(&self, input: &str, limit: usize) -> Vec<Suggestion> {
        let trimmed = input.trim();
        if trimmed.is_empty() || limit == 0 {
            return Vec::new();
        }
        let needle = trimmed.to_lowercase();

        let mut hits: Vec<Suggestion> = self
            .items
            .iter()
            .filter_map(|item| {
                let score = score_item(&needle, item);
                (score >= self.threshold).then(|| Suggestion {
                    text: item.text.clone(),
                    translation: item.translation.clone(),
                    score,
                })
            })
            .collect();

        // Stable sort: equal scores keep index (insertion) order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        hits
    }
}

fn score_item(needle: &str, item: &IndexItem) -> f64 {
    if item.text_lower == needle {
        return 1.0;
    }

    let mut best = normalized_levenshtein(needle, &item.text_lower);

    if item.text_lower.starts_with(needle) {
        let coverage = needle.chars().count() as f64 / item.text_lower.chars().count() as f64;
        best = best.max(PREFIX_BASE + PREFIX_SPAN * coverage);
    }

    for token in item.text_lower.split_whitespace() {
        best = best.max(normalized_levenshtein(needle, token) * TOKEN_WEIGHT);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_index() -> SuggestionIndex {
        let book = PhraseBook::build(
            [
                ("How are you?", "你好吗？"),
                ("Hello", "你好"),
                ("Thank you", "谢谢"),
                ("Good morning", "早上好"),
                ("Good night", "晚安"),
            ]
            .map(|(e, c)| (e.to_string(), c.to_string())),
        );
        SuggestionIndex::build(&book, Language::English)
    }

    #[test]
    fn exact_match_ranks_first() {
        let hits = make_index().query("Hello", DEFAULT_LIMIT);
        assert_eq!(hits[0].text, "Hello");
        assert_eq!(hits[0].translation, "你好");
        assert!((hits[0].score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let hits = make_index().query("hello", DEFAULT_LIMIT);
        assert_eq!(hits[0].text, "Hello");
        assert!((hits[0].score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn typo_still_matches() {
        let hits = make_index().query("Helo", DEFAULT_LIMIT);
        assert_eq!(hits[0].text, "Hello");
        assert!(hits[0].score < 1.0);
    }

    #[test]
    fn prefix_input_matches_long_phrase() {
        let hits = make_index().query("How", DEFAULT_LIMIT);
        assert_eq!(hits[0].text, "How are you?");
    }

    #[test]
    fn only_exact_match_scores_one() {
        let hits = make_index().query("Helo", DEFAULT_LIMIT);
        assert!(hits.iter().all(|s| s.score < 1.0));
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let records = [
            ("Good morning", "早上好"),
            ("Good evening", "晚上好"),
        ];
        let book = PhraseBook::build(records.map(|(e, c)| (e.to_string(), c.to_string())));
        let index = SuggestionIndex::build(&book, Language::English);
        let hits = index.query("Good", DEFAULT_LIMIT);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].score - hits[1].score).abs() < f64::EPSILON);
        assert_eq!(hits[0].text, "Good morning");

        let book = PhraseBook::build(
            [
                ("Good evening", "晚上好"),
                ("Good morning", "早上好"),
            ]
            .map(|(e, c)| (e.to_string(), c.to_string())),
        );
        let index = SuggestionIndex::build(&book, Language::English);
        let hits = index.query("Good", DEFAULT_LIMIT);
        assert_eq!(hits[0].text, "Good evening");
    }

    #[test]
    fn chinese_direction_matches_prefix() {
        let book = PhraseBook::build(
            [("How are you?", "你好吗？"), ("Hello", "你好")]
                .map(|(e, c)| (e.to_string(), c.to_string())),
        );
        let index = SuggestionIndex::build(&book, Language::Chinese);
        let hits = index.query("你好", DEFAULT_LIMIT);
        assert_eq!(hits[0].text, "你好");
        assert_eq!(hits[0].translation, "Hello");
        assert!(hits.iter().any(|s| s.text == "你好吗？"));
    }

    #[test]
    fn blank_input_yields_nothing() {
        let index = make_index();
        assert!(index.query("", DEFAULT_LIMIT).is_empty());
        assert!(index.query("   ", DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(make_index().query("Hello", 0).is_empty());
    }

    #[test]
    fn limit_truncates_ranked_results() {
        let index = make_index();
        assert_eq!(index.query("Good", DEFAULT_LIMIT).len(), 2);

        let hits = index.query("Good", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "Good morning");
    }

    #[test]
    fn gibberish_is_filtered_out() {
        assert!(make_index().query("zzzzqqq", DEFAULT_LIMIT).is_empty());
    }
}
