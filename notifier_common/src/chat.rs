//! Posting messages to a Spark room.
//!
//! The payload is `{"roomId": ..., "text": ...}` and the configured token goes
//! verbatim into the `Authorization` header.
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use crate::config::SparkSettings;
use crate::http::ensure_success;
use crate::result::Result;

/// Content type expected by the messages endpoint.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Body of a message post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage<'a> {
    /// Target room.
    pub room_id: &'a str,
    /// Message text.
    pub text: &'a str,
}

impl<'a> ChatMessage<'a> {
    /// Creates the payload for `text` addressed to `room_id`.
    pub fn new(room_id: &'a str, text: &'a str) -> Self {
        Self { room_id, text }
    }

    /// Encodes the payload as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Sends chat messages using one HTTP client and one set of credentials.
pub struct ChatPoster<'a> {
    client: &'a Client,
    settings: &'a SparkSettings,
}

impl<'a> ChatPoster<'a> {
    /// Creates a poster for the given client and `[SPARK]` settings.
    pub fn new(client: &'a Client, settings: &'a SparkSettings) -> Self {
        Self { client, settings }
    }

    /// Posts `text` to the configured room and returns the response body.
    pub fn post(&self, text: &str) -> Result<String> {
        let payload = ChatMessage::new(&self.settings.room_id, text).to_json()?;
        info!("Posting message to Spark room {}", self.settings.room_id);

        let response = self
            .client
            .post(&self.settings.url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .header(AUTHORIZATION, &self.settings.auth_token)
            .body(payload)
            .send()?;
        let body = ensure_success(response)?.text()?;
        debug!("Spark response: {}", body);
        Ok(body)
    }
}
