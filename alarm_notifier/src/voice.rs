//! Tropo call that reads the notification to the on-call engineer.
use log::info;
use notifier_common::Result;
use notifier_common::config::TropoSettings;
use notifier_common::http::ensure_success;
use reqwest::blocking::Client;

/// Query-string form of `message`: spaces become `+`, nothing else changes.
pub fn tropo_encode(message: &str) -> String {
    message.replace(' ', "+")
}

/// Session URL that makes Tropo dial the configured number and speak `message`.
pub fn call_url(settings: &TropoSettings, message: &str) -> String {
    format!(
        "{}?action=create&token={}&numberToDial={}&msg={}",
        settings.url,
        settings.auth_token,
        settings.phone_number,
        tropo_encode(message)
    )
}

/// Asks Tropo to place the call.
pub fn place_call(client: &Client, settings: &TropoSettings, message: &str) -> Result<()> {
    info!("Requesting Tropo call to {}", settings.phone_number);
    let response = client.get(call_url(settings, message)).send()?;
    ensure_success(response)?;
    Ok(())
}
