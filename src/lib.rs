//! # Jaundice Meter
//!
//! Measures the "jaundice rate" of online news articles: the percentage of
//! an article's words that come from a fixed lexicon of emotionally charged,
//! sensational terms.
//!
//! For each requested URL the pipeline downloads the page, extracts readable
//! text with a site-specific sanitizer, tokenizes it, and scores the tokens
//! against the charged-word lexicon. URLs are processed concurrently; each
//! one terminates in exactly one [`models::Report`] with a closed set of
//! outcomes (`OK`, `FETCH_ERROR`, `PARSING_ERROR`, `TIMEOUT`).
//!
//! ## Architecture
//!
//! 1. **Lexicon** ([`lexicon`]): flat-file charged-word set, loaded once and
//!    shared read-only across tasks
//! 2. **Sanitizers** ([`sanitizers`]): per-site text extractors dispatched
//!    by normalized host key
//! 3. **Scoring** ([`scoring`]): tokenizer and the jaundice-rate formula
//! 4. **Analysis** ([`analysis`]): the per-URL state machine and the
//!    fan-out/fan-in batch orchestrator
//! 5. **Server** ([`server`]): axum front end, `GET /?urls=...`

pub mod analysis;
pub mod cli;
pub mod lexicon;
pub mod models;
pub mod sanitizers;
pub mod scoring;
pub mod server;
