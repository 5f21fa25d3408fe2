//! Tokenization and jaundice-rate scoring.
//!
//! [`split_by_words`] turns sanitized plain text into normalized lowercase
//! tokens, and [`calculate_jaundice_rate`] scores a token list against the
//! charged-word lexicon. Scoring is pure and reads only shared immutable
//! state, so it is safe to call from any number of concurrent tasks.

use crate::lexicon::ChargedLexicon;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{N}]+").expect("word pattern is valid")
});

/// How many whitespace-separated pieces to process between cooperative yields.
const YIELD_EVERY: usize = 512;

/// Split raw text into lowercase word tokens.
///
/// Tokens are maximal runs of alphabetic or numeric characters; punctuation
/// and whitespace are separators. The function yields to the scheduler every
/// [`YIELD_EVERY`] pieces (and once up front for any non-empty text) so that
/// a `tokio::time::timeout` wrapped around it can interrupt the analysis of
/// arbitrarily large articles.
pub async fn split_by_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for (i, piece) in text.split_whitespace().enumerate() {
        if i % YIELD_EVERY == 0 {
            tokio::task::yield_now().await;
        }
        for found in WORD_RE.find_iter(piece) {
            words.push(found.as_str().to_lowercase());
        }
    }
    words
}

/// Percentage of `words` present in the charged-word lexicon.
///
/// Returns a value in `[0, 100]`. An empty token list scores `0.0` rather
/// than dividing by zero; an article with no words has nothing sensational
/// in it.
pub fn calculate_jaundice_rate(words: &[String], lexicon: &ChargedLexicon) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let charged = words.iter().filter(|word| lexicon.contains(word)).count();
    100.0 * charged as f64 / words.len() as f64
}
