//! Pipeline scenario tests against a local fake origin.
//!
//! The wiremock server listens on `127.0.0.1`, so tests that need the
//! sanitizing stage to succeed register a passthrough sanitizer under the
//! `127_0_0_1` host key.

use std::sync::Arc;
use std::time::Duration;

use jaundice_meter::analysis::{StageBudgets, analyze_batch, process_article};
use jaundice_meter::lexicon::ChargedLexicon;
use jaundice_meter::models::ProcessingStatus;
use jaundice_meter::sanitizers::SanitizerRegistry;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn passthrough(markup: &str, _plaintext: bool) -> String {
    markup.to_string()
}

fn local_registry() -> SanitizerRegistry {
    let mut registry = SanitizerRegistry::empty();
    registry.register("127_0_0_1", passthrough);
    registry
}

fn lexicon(words: &[&str]) -> ChargedLexicon {
    ChargedLexicon::from_words(words.iter().copied())
}

async fn serve(status: u16, body: &str, route: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn reports_fetch_error_on_404() {
    let server = serve(404, "", "/missing").await;
    let url = format!("{}/missing", server.uri());

    let client = reqwest::Client::new();
    let report = process_article(
        &client,
        &lexicon(&[]),
        &local_registry(),
        StageBudgets::default(),
        &url,
    )
    .await;

    assert_eq!(report.status, ProcessingStatus::FetchError);
    assert_eq!(report.url, url);
    assert!(report.score.is_none());
    assert!(report.words_count.is_none());
}

#[tokio::test]
async fn reports_parsing_error_without_sanitizer() {
    let server = serve(200, "<html>ok</html>", "/article").await;
    let url = format!("{}/article", server.uri());

    let client = reqwest::Client::new();
    let report = process_article(
        &client,
        &lexicon(&[]),
        &SanitizerRegistry::empty(),
        StageBudgets::default(),
        &url,
    )
    .await;

    assert_eq!(report.status, ProcessingStatus::ParsingError);
    assert!(report.score.is_none());
}

#[tokio::test]
async fn reports_timeout_when_fetch_exceeds_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("ok")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    let url = format!("{}/slow", server.uri());

    let budgets = StageBudgets {
        fetch: Duration::from_millis(50),
        ..StageBudgets::default()
    };
    let client = reqwest::Client::new();
    let report = process_article(&client, &lexicon(&[]), &local_registry(), budgets, &url).await;

    assert_eq!(report.status, ProcessingStatus::Timeout);
    assert!(report.score.is_none());
}

#[tokio::test]
async fn reports_timeout_when_analysis_exceeds_budget() {
    let server = serve(200, "plenty of words to tokenize here", "/big").await;
    let url = format!("{}/big", server.uri());

    // A zero analysis budget expires at the tokenizer's first yield point.
    let budgets = StageBudgets {
        analyze: Duration::ZERO,
        ..StageBudgets::default()
    };
    let client = reqwest::Client::new();
    let report = process_article(&client, &lexicon(&[]), &local_registry(), budgets, &url).await;

    assert_eq!(report.status, ProcessingStatus::Timeout);
    assert!(report.score.is_none());
    assert!(report.words_count.is_none());
}

#[tokio::test]
async fn scores_article_against_lexicon() {
    let server = serve(200, "foo bar charged1", "/scored").await;
    let url = format!("{}/scored", server.uri());

    let client = reqwest::Client::new();
    let report = process_article(
        &client,
        &lexicon(&["charged1"]),
        &local_registry(),
        StageBudgets::default(),
        &url,
    )
    .await;

    assert_eq!(report.status, ProcessingStatus::Ok);
    assert_eq!(report.words_count, Some(3));
    let score = report.score.expect("OK report carries a score");
    assert!((score - 100.0 / 3.0).abs() < 0.01);
}

#[tokio::test]
async fn batch_returns_one_report_per_url_including_duplicates() {
    let server = serve(200, "foo bar", "/a").await;
    let good = format!("{}/a", server.uri());
    let missing = format!("{}/nope", server.uri());

    let urls = vec![good.clone(), missing.clone(), good.clone(), "not a url".to_string()];
    let reports = analyze_batch(
        &urls,
        Arc::new(lexicon(&["foo"])),
        Arc::new(local_registry()),
        StageBudgets::default(),
    )
    .await
    .expect("client builds");

    assert_eq!(reports.len(), urls.len());
    let ok_count = reports
        .iter()
        .filter(|r| r.status == ProcessingStatus::Ok)
        .count();
    assert_eq!(ok_count, 2);

    // Every input URL is echoed back exactly once per occurrence.
    let mut reported: Vec<_> = reports.iter().map(|r| r.url.clone()).collect();
    let mut expected = urls.clone();
    reported.sort();
    expected.sort();
    assert_eq!(reported, expected);
}

#[tokio::test]
async fn panicking_task_is_contained_and_siblings_complete() {
    fn exploding(markup: &str, _plaintext: bool) -> String {
        if markup.contains("BOOM") {
            panic!("sanitizer blew up");
        }
        markup.to_string()
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(200).set_body_string("BOOM"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fine"))
        .respond_with(ResponseTemplate::new(200).set_body_string("calm words only"))
        .mount(&server)
        .await;

    let mut registry = SanitizerRegistry::empty();
    registry.register("127_0_0_1", exploding);

    let boom = format!("{}/boom", server.uri());
    let fine = format!("{}/fine", server.uri());
    let urls = vec![boom.clone(), fine.clone()];
    let reports = analyze_batch(
        &urls,
        Arc::new(lexicon(&["calm"])),
        Arc::new(registry),
        StageBudgets::default(),
    )
    .await
    .expect("client builds");

    assert_eq!(reports.len(), 2);
    let boom_report = reports.iter().find(|r| r.url == boom).unwrap();
    assert_eq!(boom_report.status, ProcessingStatus::FetchError);
    assert!(boom_report.score.is_none());

    let fine_report = reports.iter().find(|r| r.url == fine).unwrap();
    assert_eq!(fine_report.status, ProcessingStatus::Ok);
    assert_eq!(fine_report.words_count, Some(3));
}

#[tokio::test]
async fn batch_reports_uphold_the_score_invariant() {
    let server = serve(200, "words words words", "/ok").await;
    let urls = vec![
        format!("{}/ok", server.uri()),
        format!("{}/404", server.uri()),
        "https://unregistered.example/article".to_string(),
    ];

    let reports = analyze_batch(
        &urls,
        Arc::new(lexicon(&["words"])),
        Arc::new(local_registry()),
        StageBudgets::default(),
    )
    .await
    .expect("client builds");

    for report in &reports {
        let ok = report.status == ProcessingStatus::Ok;
        assert_eq!(report.score.is_some(), ok, "url {}", report.url);
        assert_eq!(report.words_count.is_some(), ok, "url {}", report.url);
        if let Some(score) = report.score {
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
