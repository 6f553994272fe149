//! Command-line arguments for the alarm notifier.
use std::path::PathBuf;

use clap::Parser;
use notifier_common::config::DEFAULT_SETTINGS_FILE;

use crate::alarms::Severity;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the settings file with the [PRIME], [SPARK] and [TROPO] sections.
    #[clap(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Alarm severity to report.
    #[clap(long, value_enum, default_value_t = Severity::Critical)]
    pub severity: Severity,

    /// Accept invalid TLS certificates (self-signed Prime or proxy deployments).
    #[clap(long)]
    pub insecure: bool,

    /// Do not wait for RETURN between steps.
    #[clap(long)]
    pub no_prompt: bool,

    /// Post to Spark but do not place the Tropo call.
    #[clap(long)]
    pub skip_call: bool,

    /// Per-request timeout in seconds. Requests block indefinitely when omitted.
    #[clap(long)]
    pub timeout: Option<u64>,
}
