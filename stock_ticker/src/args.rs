//! Command-line arguments for the stock ticker.
use std::path::PathBuf;

use clap::Parser;
use notifier_common::config::DEFAULT_SETTINGS_FILE;

use crate::model::quote::DEFAULT_QUOTE_URL;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Settings file; only its [SPARK] section is read.
    #[clap(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Ticker symbol to report.
    #[clap(long, default_value = "CSCO")]
    pub symbol: String,

    /// Company name shown in the report heading.
    #[clap(long, default_value = "Cisco")]
    pub label: String,

    /// Quote endpoint; `?symbol=<SYMBOL>` is appended.
    #[clap(long, default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Accept invalid TLS certificates.
    #[clap(long)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[clap(long)]
    pub timeout: Option<u64>,
}
