//! Minimal Prime Infrastructure REST client.
//!
//! Every request is an authenticated (HTTP basic) GET below the configured REST
//! root, asking for XML. Connecting issues one probe request so bad credentials or
//! an unreachable host show up before any alarm is fetched.
use log::debug;
use notifier_common::config::PrimeSettings;
use notifier_common::http::ensure_success;
use notifier_common::{NotifierError, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

/// Cheapest authenticated query; used to validate the login.
const LOGIN_PROBE: &str = "data/Alarms?.maxResults=1";

/// Authenticated session against one Prime instance.
pub struct PrimeClient<'a> {
    client: &'a Client,
    settings: &'a PrimeSettings,
    root: String,
}

impl<'a> PrimeClient<'a> {
    /// Verifies the credentials and returns a ready client.
    pub fn connect(client: &'a Client, settings: &'a PrimeSettings) -> Result<Self> {
        let api = Self {
            client,
            settings,
            root: settings.api_root(),
        };
        api.get_xml(LOGIN_PROBE)
            .map_err(|e| NotifierError::Login(e.to_string()))?;
        Ok(api)
    }

    /// GETs `path` (relative to the REST root) and returns the XML body.
    pub fn get_xml(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.root, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.settings.user, Some(&self.settings.password))
            .header(ACCEPT, "application/xml")
            .send()?;
        Ok(ensure_success(response)?.text()?)
    }
}
