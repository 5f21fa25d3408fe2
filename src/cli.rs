//! Command-line interface definitions.
//!
//! The binary exposes two modes: a one-shot `analyze` run over a list of
//! URLs, and a long-running `serve` mode exposing the same pipeline over
//! HTTP.

use clap::{Parser, Subcommand};

/// Default location of the charged-word lexicon file.
pub const DEFAULT_LEXICON: &str = "charged_dict/negative_words.txt";

/// Command-line arguments for the jaundice meter.
///
/// # Examples
///
/// ```sh
/// # Analyze a batch of URLs and print one report per URL
/// jaundice_meter analyze https://inosmi.ru/20220204/armiya-252869308.html
///
/// # Serve the analyzer over HTTP
/// jaundice_meter serve --port 8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a batch of article URLs and print one report per URL
    Analyze {
        /// Article URLs to analyze
        #[arg(required = true)]
        urls: Vec<String>,

        /// Path to the charged-word lexicon file
        #[arg(short, long, default_value = DEFAULT_LEXICON)]
        lexicon: String,
    },
    /// Serve the analyzer over HTTP (GET /?urls=a,b,c)
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Path to the charged-word lexicon file
        #[arg(short, long, default_value = DEFAULT_LEXICON)]
        lexicon: String,
    },
}
