//! Data model types received from the quote API.
//!
//! - `quote` — quote payload, fetching and the chat report built from it.
pub mod quote;
