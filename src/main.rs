//! Binary entry point: tracing setup and CLI dispatch.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use jaundice_meter::analysis::{StageBudgets, analyze_batch};
use jaundice_meter::cli::{Cli, Command};
use jaundice_meter::lexicon::ChargedLexicon;
use jaundice_meter::models::Report;
use jaundice_meter::sanitizers::SanitizerRegistry;
use jaundice_meter::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();

    match args.command {
        Command::Analyze { urls, lexicon } => analyze_command(urls, &lexicon).await,
        Command::Serve { host, port, lexicon } => serve_command(&host, port, &lexicon).await,
    }
}

async fn analyze_command(urls: Vec<String>, lexicon_path: &str) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();

    // Missing lexicon is fatal; no task may start without it.
    let lexicon = match ChargedLexicon::load(lexicon_path).await {
        Ok(lexicon) => Arc::new(lexicon),
        Err(e) => {
            error!(path = lexicon_path, error = %e, "Cannot load charged-word lexicon");
            return Err(Box::new(e));
        }
    };

    let registry = Arc::new(SanitizerRegistry::default());
    let reports = analyze_batch(&urls, lexicon, registry, StageBudgets::default()).await?;

    for report in &reports {
        print_report(report);
    }
    info!(
        count = reports.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Analyze run complete"
    );
    Ok(())
}

fn print_report(report: &Report) {
    println!("URL: {}", report.url);
    println!("Status: {}", report.status);
    let score = report
        .score
        .map_or_else(|| "-".to_string(), |score| format!("{score:.2}"));
    let words = report
        .words_count
        .map_or_else(|| "-".to_string(), |count| count.to_string());
    println!("Score: {score}");
    println!("Words in article: {words}");
    println!();
}

async fn serve_command(host: &str, port: u16, lexicon_path: &str) -> Result<(), Box<dyn Error>> {
    let lexicon = match ChargedLexicon::load(lexicon_path).await {
        Ok(lexicon) => Arc::new(lexicon),
        Err(e) => {
            error!(path = lexicon_path, error = %e, "Cannot load charged-word lexicon");
            return Err(Box::new(e));
        }
    };

    let state = AppState {
        lexicon,
        registry: Arc::new(SanitizerRegistry::default()),
        budgets: StageBudgets::default(),
    };
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    server::run(addr, state).await
}
