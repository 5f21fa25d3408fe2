//! Charged-word lexicon loading.
//!
//! The lexicon is a flat UTF-8 text file with one emotionally charged word
//! per line. It is loaded once per run and shared read-only across all
//! concurrent article tasks, so the type is deliberately immutable after
//! construction.

use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::{info, instrument};

/// An immutable set of lowercase charged words.
///
/// A word is "charged" when it contributes to sensational tone; the jaundice
/// rate of an article is the percentage of its tokens found in this set.
#[derive(Debug, Default)]
pub struct ChargedLexicon {
    words: HashSet<String>,
}

impl ChargedLexicon {
    /// Load the lexicon from a file, one word per line.
    ///
    /// Trailing whitespace is stripped and blank lines are dropped: an empty
    /// string can never match a real token, so keeping it would only inflate
    /// the set. A missing or unreadable file is a fatal startup error; the
    /// caller must not start any article task without a lexicon.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let lexicon = Self::from_lines(raw.lines());
        info!(words = lexicon.len(), "Loaded charged-word lexicon");
        Ok(lexicon)
    }

    /// Build a lexicon from raw lines, applying the same normalization as
    /// [`ChargedLexicon::load`].
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let words = lines
            .into_iter()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Build a lexicon from already-normalized words. Mostly useful in tests.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `word` is in the charged set. Callers are expected to pass
    /// already-lowercased tokens.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of charged words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
