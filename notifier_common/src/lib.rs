//!
//! Common types and helpers shared by the alarm notifier and the stock ticker.
//!
//! This crate aggregates:
//! - `error` — unified error type `NotifierError` and its `ErrorKind`.
//! - `result` — handy `Result<T, NotifierError>` alias.
//! - `config` — `settings.cfg` loader (`[PRIME]`, `[SPARK]`, `[TROPO]`).
//! - `http` — blocking HTTP client construction.
//! - `chat` — posting messages to a Spark room.
//! - `console` — blocking operator prompts.
#![warn(missing_docs)]
pub mod chat;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod result;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{ErrorKind, NotifierError};
pub use result::Result;
