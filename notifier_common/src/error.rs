//! Error types shared by the alarm notifier and the stock ticker.
//!
//! `NotifierError` unifies configuration, transport and parse failures so every
//! step can return a single error type. [`NotifierError::kind`] groups the
//! variants so callers can decide per kind whether to halt or carry on.
use std::io;

use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Coarse classification of a [`NotifierError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    /// Settings file missing, unreadable or incomplete.
    Config,
    /// The remote side could not be reached or refused the request.
    Transport,
    /// The remote side answered with something we could not understand.
    Parse,
}

/// Unified error type shared by both binaries.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// I/O error originating from the standard library (console, files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The settings file could not be read or is not valid INI.
    #[error("Config error: {0}")]
    Config(String),

    /// A required section or key is absent from the settings file.
    #[error("Missing setting: [{section}] {key}")]
    MissingSetting {
        /// Section name, e.g. `PRIME`.
        section: String,
        /// Key name, e.g. `PRIME_URL`.
        key: String,
    },

    /// Request could not be built or sent, or the connection failed.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Login against the management API was rejected.
    #[error("Login failed: {0}")]
    Login(String),

    /// The response body is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// An expected element is absent from an XML response.
    #[error("Element <{0}> not found in response")]
    MissingElement(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl NotifierError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotifierError::Io(_) | NotifierError::Config(_) | NotifierError::MissingSetting { .. } => {
                ErrorKind::Config
            }
            NotifierError::Transport(_) | NotifierError::HttpStatus { .. } | NotifierError::Login(_) => {
                ErrorKind::Transport
            }
            NotifierError::Xml(_) | NotifierError::MissingElement(_) | NotifierError::SerdeJson(_) => {
                ErrorKind::Parse
            }
        }
    }
}
