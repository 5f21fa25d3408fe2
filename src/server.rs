//! HTTP front end for the analyzer.
//!
//! A single route, `GET /?urls=<comma-separated>`, runs one analysis batch
//! and returns the reports as a JSON array. Request validation is the only
//! error that surfaces at this boundary; per-URL failures are already folded
//! into the reports by the pipeline.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::analysis::{StageBudgets, analyze_batch};
use crate::lexicon::ChargedLexicon;
use crate::sanitizers::SanitizerRegistry;

/// Hard cap on URLs per request.
pub const MAX_URLS_PER_REQUEST: usize = 10;

/// Shared service state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Charged-word lexicon, loaded before the server starts accepting.
    pub lexicon: Arc<ChargedLexicon>,
    /// Sanitizer dispatch table.
    pub registry: Arc<SanitizerRegistry>,
    /// Stage budgets applied to every article task.
    pub budgets: StageBudgets,
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    urls: Option<String>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(handle_analyze)).with_state(state)
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

async fn handle_analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Response {
    let raw = match query.urls {
        Some(raw) if !raw.is_empty() => raw,
        _ => return bad_request("no urls in request"),
    };
    // Empty segments are kept: each becomes its own (failing) report and
    // counts toward the cap.
    let urls: Vec<String> = raw.split(',').map(str::to_string).collect();

    if urls.len() > MAX_URLS_PER_REQUEST {
        warn!(count = urls.len(), "Rejecting oversized batch");
        return bad_request("too many urls in request, should be 10 or less");
    }

    match analyze_batch(
        &urls,
        Arc::clone(&state.lexicon),
        Arc::clone(&state.registry),
        state.budgets,
    )
    .await
    {
        Ok(reports) => Json(reports).into_response(),
        Err(e) => {
            error!(error = %e, "Batch aborted before any task started");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
    }
}

/// Bind and serve until the process is stopped.
pub async fn run(addr: SocketAddr, state: AppState) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Jaundice meter listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
