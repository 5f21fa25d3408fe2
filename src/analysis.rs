//! The concurrent article-analysis pipeline.
//!
//! [`process_article`] is the per-URL unit of work. It walks a short state
//! machine, `FETCHING → SANITIZING → ANALYZING → DONE`, with early exits to
//! the terminal failure statuses, and always terminates in exactly one
//! [`Report`].
//!
//! [`analyze_batch`] fans one task out per URL, waits for every task to
//! reach a terminal state, and collects the reports. Failures never cross
//! task boundaries: each URL's outcome is independent of its siblings.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

use crate::lexicon::ChargedLexicon;
use crate::models::{ProcessingStatus, Report};
use crate::sanitizers::SanitizerRegistry;
use crate::scoring::{calculate_jaundice_rate, split_by_words};

/// Time budgets for the two bounded pipeline stages.
///
/// Fetching and analyzing have independent risk profiles (network latency
/// vs. CPU-bound text processing), so each gets its own budget; a slow
/// download never eats into the analysis allowance. The sanitizer lookup in
/// between is pure local dispatch and is not timed.
#[derive(Debug, Clone, Copy)]
pub struct StageBudgets {
    /// Maximum wall time for the HTTP GET, headers to body.
    pub fetch: Duration,
    /// Maximum wall time for tokenizing and scoring the article text.
    pub analyze: Duration,
}

impl Default for StageBudgets {
    fn default() -> Self {
        Self {
            fetch: Duration::from_secs(2),
            analyze: Duration::from_secs(3),
        }
    }
}

/// Download the article body, treating any non-2xx status as an error.
async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    let response = client.get(url).send().await?;
    response.error_for_status()?.text().await
}

/// Analyze one article URL to a terminal [`Report`].
///
/// Stages:
/// 1. **Fetching** (bounded by `budgets.fetch`): HTTP GET. A non-2xx status
///    or transport error ends in `FETCH_ERROR`; running out of budget ends
///    in `TIMEOUT`.
/// 2. **Sanitizing** (untimed): sanitizer lookup by the URL's host key, then
///    plain-text extraction. An unknown host ends in `PARSING_ERROR`.
/// 3. **Analyzing** (bounded by `budgets.analyze`): tokenize and score.
///    Running out of budget ends in `TIMEOUT`; otherwise the report carries
///    the jaundice rate and the token count.
///
/// Every path returns exactly one report; nothing escapes as an error.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn process_article(
    client: &reqwest::Client,
    lexicon: &ChargedLexicon,
    registry: &SanitizerRegistry,
    budgets: StageBudgets,
    url: &str,
) -> Report {
    let html = match timeout(budgets.fetch, fetch(client, url)).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            warn!(error = %e, "Fetch failed");
            return Report::failed(url, ProcessingStatus::FetchError);
        }
        Err(_) => {
            warn!(budget_ms = budgets.fetch.as_millis() as u64, "Fetch exceeded its budget");
            return Report::failed(url, ProcessingStatus::Timeout);
        }
    };

    let sanitize = match registry.lookup(url) {
        Ok(sanitize) => sanitize,
        Err(e) => {
            warn!(error = %e, "No sanitizer for article host");
            return Report::failed(url, ProcessingStatus::ParsingError);
        }
    };

    // The reported analysis time covers text extraction as well as
    // tokenizing and scoring; only the latter two are budgeted.
    let analysis_started = Instant::now();
    let text = sanitize(&html, true);
    let words = match timeout(budgets.analyze, split_by_words(&text)).await {
        Ok(words) => words,
        Err(_) => {
            warn!(
                budget_ms = budgets.analyze.as_millis() as u64,
                "Analysis exceeded its budget"
            );
            return Report::failed(url, ProcessingStatus::Timeout);
        }
    };
    let score = calculate_jaundice_rate(&words, lexicon);
    info!(
        elapsed_ms = analysis_started.elapsed().as_millis() as u64,
        words = words.len(),
        score,
        "Analysis finished"
    );

    Report::ok(url, score, words.len())
}

/// Analyze a batch of URLs concurrently, producing one report per URL.
///
/// One HTTP client is built per batch and shared by all tasks for connection
/// reuse; the lexicon and registry are shared read-only. Each URL runs in
/// its own spawned task, and the function returns only after every task has
/// reached a terminal state. Duplicated input URLs produce independent
/// duplicate reports; report order is unspecified.
///
/// A task that dies outside the enumerated failure paths (a panic, for
/// instance) is contained by its task boundary and recorded as a
/// `FETCH_ERROR` report for that URL alone; it can never cancel siblings.
///
/// The only error this function itself returns is a failure to construct
/// the HTTP client, which happens before any task starts.
#[instrument(level = "info", skip_all, fields(urls = urls.len()))]
pub async fn analyze_batch(
    urls: &[String],
    lexicon: Arc<ChargedLexicon>,
    registry: Arc<SanitizerRegistry>,
    budgets: StageBudgets,
) -> Result<Vec<Report>, reqwest::Error> {
    let batch_started = Instant::now();
    let client = reqwest::Client::builder().build()?;

    let handles: Vec<_> = urls
        .iter()
        .cloned()
        .map(|url| {
            let client = client.clone();
            let lexicon = Arc::clone(&lexicon);
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                process_article(&client, &lexicon, &registry, budgets, &url).await
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(urls.len());
    for (joined, url) in join_all(handles).await.into_iter().zip(urls) {
        match joined {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!(%url, error = %e, "Article task died unexpectedly");
                reports.push(Report::failed(url, ProcessingStatus::FetchError));
            }
        }
    }

    info!(
        count = reports.len(),
        elapsed_ms = batch_started.elapsed().as_millis() as u64,
        "Batch complete"
    );
    Ok(reports)
}
