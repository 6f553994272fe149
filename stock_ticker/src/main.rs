//! Stock Ticker — fetches a live quote and shares it in a Spark room.
//!
//! Usage example (CLI):
//! ```bash
//! stock_ticker --config ./settings.cfg --symbol CSCO --label Cisco
//! ```
//!
//! The run is linear and has no recovery: a failed fetch, a missing quote field,
//! or a rejected post ends it with an error. The Spark response body is printed.
#![warn(missing_docs)]
mod args;
mod model;

use crate::args::Args;
use crate::model::quote::{StockQuote, format_report, quote_url};
use clap::Parser;
use log::info;
use notifier_common::chat::ChatPoster;
use notifier_common::config::SparkSettings;
use notifier_common::http::{HttpOptions, build_client};
use notifier_common::{NotifierError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

fn main() -> Result<(), NotifierError> {
    init_logger();
    let args = Args::parse();

    let spark = SparkSettings::load(&args.config)?;
    let client = build_client(HttpOptions {
        insecure: args.insecure,
        timeout: args.timeout.map(Duration::from_secs),
    })?;
    let source = quote_url(&args.quote_url, &args.symbol);

    let response = share_quote(&client, &spark, &args.label, &source)?;
    println!("{}", response);
    Ok(())
}

/// Fetches the quote at `source`, posts the report, and returns the Spark response body.
fn share_quote(client: &Client, spark: &SparkSettings, label: &str, source: &str) -> Result<String> {
    let quote = StockQuote::fetch(client, source)?;
    let report = format_report(&quote, label, source);
    info!("Report:\n{}", report);
    ChatPoster::new(client, spark).post(&report)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
