//! Prime Infrastructure alarm extractor and notifier.
//!
//! Logs into Prime, lists every alarm of the selected severity (critical by default)
//! raised in the trailing 48 hours, fetches each alarm's message, and composes one
//! summary. The summary is posted to a Spark room, then read out by a Tropo call.
//!
//! Usage example (CLI):
//! ```bash
//! alarm_notifier --config ./settings.cfg
//! alarm_notifier --config ./settings.cfg --no-prompt --skip-call
//! ```
//!
//! Between steps the tool waits for RETURN so an operator can follow along; pass
//! `--no-prompt` for unattended runs. Failures that leave nothing to report (login,
//! alarm listing, alarm details, the call itself) end the run with an error. A failed
//! Spark post is reported and the run continues with the call.
#![warn(missing_docs)]
mod alarms;
mod args;
mod notification;
mod prime;
mod voice;

use crate::alarms::{AlarmWindow, fetch_alarm_ids, fetch_alarms};
use crate::args::Args;
use crate::notification::build_notification;
use crate::prime::PrimeClient;
use crate::voice::place_call;
use chrono::Local;
use clap::Parser;
use log::{error, info};
use notifier_common::chat::ChatPoster;
use notifier_common::config::{REQUIRED_KEYS, Settings};
use notifier_common::console::Console;
use notifier_common::http::{HttpOptions, build_client};
use notifier_common::{NotifierError, Result};
use std::path::Path;
use std::time::Duration;

const ACKNOWLEDGE: &str = "Press RETURN to continue...";

fn main() -> Result<(), NotifierError> {
    init_logger();
    let args = Args::parse();
    let console = Console::new(!args.no_prompt);

    let settings = load_settings(&args.config, &console)?;
    print_banner();
    run(&args, &settings, &console)
}

/// Runs the whole alarm flow with already-loaded settings.
fn run(args: &Args, settings: &Settings, console: &Console) -> Result<()> {
    let client = build_client(HttpOptions {
        insecure: args.insecure,
        timeout: args.timeout.map(Duration::from_secs),
    })?;

    info!(
        "Logging into Prime @{} as {}...",
        settings.prime.url, settings.prime.user
    );
    let api = match PrimeClient::connect(&client, &settings.prime) {
        Ok(api) => api,
        Err(e) => {
            error!("Access to Prime Infrastructure failed: {}", e);
            console.pause(ACKNOWLEDGE)?;
            return Err(e);
        }
    };
    info!("Access to PI successful");
    console.pause("Press RETURN to continue with fetching the alarms from Prime...")?;

    let window = AlarmWindow::trailing_48h(Local::now());
    info!(
        "Fetching all {} alarms between {} and {}.",
        args.severity, window.start, window.end
    );
    let ids = match fetch_alarm_ids(&api, args.severity, &window) {
        Ok(ids) => ids,
        Err(e) => {
            error!("Error while fetching alerts from Prime ({}): {}", e.kind(), e);
            error!("No notification is sent: the alarm count is unknown.");
            console.pause(ACKNOWLEDGE)?;
            return Err(e);
        }
    };
    info!("Prime reported {} alarm(s)", ids.len());

    let alarms = fetch_alarms(&api, &ids)?;
    let notification = build_notification(args.severity, &alarms);
    println!("{}", notification);
    println!();

    console.pause("HIT RETURN TO CONTINUE TO SEND THE NOTIFICATION MESSAGE TO SPARK")?;
    if let Err(e) = ChatPoster::new(&client, &settings.spark).post(&notification) {
        error!("Error whilst posting to Spark: {}", e);
        console.pause(ACKNOWLEDGE)?;
    }

    if args.skip_call {
        info!("Skipping the Tropo call (--skip-call)");
        return Ok(());
    }
    console.pause("HIT RETURN TO ISSUE THE CALL TO THE TROPO API")?;
    place_call(&client, &settings.tropo, &notification)?;
    info!("Tropo call requested");
    Ok(())
}

/// Loads settings; a broken section is reported and left blank so only the steps
/// that depend on it fail, each with its own error.
fn load_settings(path: &Path, console: &Console) -> Result<Settings> {
    let (settings, errors) = Settings::load_lenient(path);
    if errors.is_empty() {
        return Ok(settings);
    }
    for e in &errors {
        error!("Error whilst reading from the config file: {}", e);
    }
    error!(
        "Make sure {} exists and defines: {}",
        path.display(),
        REQUIRED_KEYS.join(", ")
    );
    console.pause(ACKNOWLEDGE)?;
    Ok(settings)
}

fn print_banner() {
    println!("######################################################");
    println!("####                                              ####");
    println!("####     PRIME INFRASTRUCTURE ALARM EXTRACTOR     ####");
    println!("####               AND NOTIFIER TOOL              ####");
    println!("####                                              ####");
    println!("######################################################");
    println!();
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarms::Severity;
    use notifier_common::config::{PrimeSettings, SparkSettings, TropoSettings};
    use notifier_common::testing::{CannedResponse, MockServer};
    use std::path::PathBuf;

    fn args(skip_call: bool) -> Args {
        Args {
            config: PathBuf::from("settings.cfg"),
            severity: Severity::Critical,
            insecure: false,
            no_prompt: true,
            skip_call,
            timeout: Some(10),
        }
    }

    fn settings(base: &str) -> Settings {
        Settings {
            prime: PrimeSettings {
                url: base.to_string(),
                user: "admin".into(),
                password: "pw".into(),
                api_path: "webacs/api/v1".into(),
            },
            spark: SparkSettings {
                auth_token: "Bearer tok".into(),
                room_id: "room-1".into(),
                url: format!("{}/v1/messages", base),
            },
            tropo: TropoSettings {
                auth_token: "tropo".into(),
                phone_number: "1555".into(),
                url: format!("{}/1.0/sessions", base),
            },
        }
    }

    const LIST: &str = "<queryResponse><entityId>7</entityId></queryResponse>";
    const DETAIL: &str = "<queryResponse><entity><alarmsDTO><message>Fan failure</message></alarmsDTO></entity></queryResponse>";
    const EXPECTED: &str = "There were a total of 1 critical alerts in the last 48 hours. Alert number 1. Fan failure Goodbye... And Good Luck.";

    #[test]
    fn full_run_posts_and_calls() {
        let server = MockServer::serve(vec![
            CannedResponse::xml("<queryResponse/>"),
            CannedResponse::xml(LIST),
            CannedResponse::xml(DETAIL),
            CannedResponse::json("{}"),
            CannedResponse::json("{}"),
        ])
        .unwrap();
        let settings = settings(&server.url());

        run(&args(false), &settings, &Console::new(false)).unwrap();

        let requests = server.finish();
        assert_eq!(requests[2].target, "/webacs/api/v1/data/Alarms/7");
        let chat: serde_json::Value = serde_json::from_str(&requests[3].body).unwrap();
        assert_eq!(chat["roomId"], "room-1");
        assert_eq!(chat["text"], EXPECTED);
        assert!(requests[4].target.ends_with(&format!("&msg={}", EXPECTED.replace(' ', "+"))));
    }

    #[test]
    fn failed_chat_post_still_calls() {
        let server = MockServer::serve(vec![
            CannedResponse::xml("<queryResponse/>"),
            CannedResponse::xml("<queryResponse/>"),
            CannedResponse::status(500),
            CannedResponse::json("{}"),
        ])
        .unwrap();
        let settings = settings(&server.url());

        run(&args(false), &settings, &Console::new(false)).unwrap();

        let requests = server.finish();
        assert_eq!(requests[3].method, "GET");
        assert!(requests[3].target.starts_with("/1.0/sessions?action=create&token=tropo"));
    }

    #[test]
    fn failed_listing_sends_nothing() {
        let server = MockServer::serve(vec![
            CannedResponse::xml("<queryResponse/>"),
            CannedResponse::xml("not xml"),
        ])
        .unwrap();
        let settings = settings(&server.url());

        let err = run(&args(true), &settings, &Console::new(false)).unwrap_err();
        assert_eq!(err.kind(), notifier_common::ErrorKind::Parse);
        assert_eq!(server.finish().len(), 2);
    }

    #[test]
    fn unreadable_config_falls_back_to_blank() {
        let settings = load_settings(Path::new("/nonexistent/settings.cfg"), &Console::new(false)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_tropo_key_keeps_prime_and_spark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        std::fs::write(
            &path,
            "[PRIME]\nPRIME_URL = https://prime\nPRIME_USER = admin\nPRIME_PW = pw\n\n\
             [SPARK]\nSPARK_AUTH_TOKEN = tok\nSPARK_ROOM_ID = room-1\nSPARK_URL = https://chat\n\n\
             [TROPO]\nTROPO_AUTH_TOKEN = tropo\n",
        )
        .unwrap();

        let settings = load_settings(&path, &Console::new(false)).unwrap();
        assert_eq!(settings.prime.url, "https://prime");
        assert_eq!(settings.spark.room_id, "room-1");
        assert_eq!(settings.tropo, TropoSettings::default());
    }
}
