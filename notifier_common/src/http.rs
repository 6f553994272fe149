//! Blocking HTTP client construction shared by both binaries.
use std::time::Duration;

use log::warn;
use reqwest::blocking::{Client, Response};

use crate::error::NotifierError;
use crate::result::Result;

/// Transport knobs taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOptions {
    /// Skip TLS certificate validation.
    pub insecure: bool,
    /// Whole-request timeout; `None` blocks indefinitely.
    pub timeout: Option<Duration>,
}

/// Builds the client used for every request of a run.
pub fn build_client(options: HttpOptions) -> Result<Client> {
    if options.insecure {
        warn!("TLS certificate validation is DISABLED (--insecure)");
    }
    let client = Client::builder()
        .danger_accept_invalid_certs(options.insecure)
        .timeout(options.timeout)
        .build()?;
    Ok(client)
}

/// Maps a non-2xx response to [`NotifierError::HttpStatus`].
pub fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(NotifierError::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}
