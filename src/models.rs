//! Data models for per-article analysis outcomes.
//!
//! Every analyzed URL produces exactly one [`Report`], regardless of whether
//! the analysis succeeded. The [`ProcessingStatus`] enum is the closed set of
//! terminal outcomes an article task can reach; nothing else ever leaks out
//! of the pipeline.

use serde::Serialize;
use std::fmt;

/// Terminal outcome of one article task.
///
/// The set is closed: every failure inside the pipeline is mapped onto one
/// of these variants and reported per URL, never propagated to the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// All stages completed; the report carries a score and a word count.
    Ok,
    /// The HTTP GET failed (non-2xx status or transport error).
    FetchError,
    /// No sanitizer is registered for the article's host.
    ParsingError,
    /// The fetch or analysis stage exceeded its time budget.
    Timeout,
}

impl ProcessingStatus {
    /// The wire name of the status, as serialized in JSON responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "OK",
            ProcessingStatus::FetchError => "FETCH_ERROR",
            ProcessingStatus::ParsingError => "PARSING_ERROR",
            ProcessingStatus::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-URL outcome record.
///
/// Invariant: `score` and `words_count` are both `Some` exactly when
/// `status` is [`ProcessingStatus::Ok`]. The constructors below are the only
/// way the pipeline builds reports, which keeps the invariant local.
///
/// `url` is echoed back exactly as it was requested, without normalization.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Terminal status of the article task.
    pub status: ProcessingStatus,
    /// The input URL, unmodified.
    pub url: String,
    /// Jaundice rate in `[0, 100]`; `null` unless `status` is `OK`.
    pub score: Option<f64>,
    /// Number of tokens in the article; `null` unless `status` is `OK`.
    pub words_count: Option<usize>,
}

impl Report {
    /// Build a successful report with its score and word count attached.
    pub fn ok(url: impl Into<String>, score: f64, words_count: usize) -> Self {
        Self {
            status: ProcessingStatus::Ok,
            url: url.into(),
            score: Some(score),
            words_count: Some(words_count),
        }
    }

    /// Build a failure report. Score and word count stay unset.
    pub fn failed(url: impl Into<String>, status: ProcessingStatus) -> Self {
        debug_assert!(status != ProcessingStatus::Ok, "use Report::ok for successes");
        Self {
            status,
            url: url.into(),
            score: None,
            words_count: None,
        }
    }
}
