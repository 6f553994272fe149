//! Alarm queries against Prime.
//!
//! Fetching is two-phase: one query lists the IDs of every matching alarm raised in
//! the trailing 48 hours, then each alarm is fetched on its own to read its
//! `message`. Detail requests run strictly in sequence and the first failure aborts.
use chrono::{DateTime, TimeDelta, TimeZone};
use clap::ValueEnum;
use log::info;
use notifier_common::{NotifierError, Result};
use strum_macros::{Display, EnumString};

use crate::prime::PrimeClient;

/// Length of the reporting window.
pub const WINDOW_SECS: i64 = 172_800;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Prime alarm severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Warning,
    Information,
    Cleared,
}

impl Severity {
    /// Lowercase name used in the spoken/posted summary.
    pub fn label(&self) -> String {
        self.to_string().to_lowercase()
    }
}

/// Date range of the alarm query, both ends as `YYYY-MM-DD` local dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmWindow {
    pub start: String,
    pub end: String,
}

impl AlarmWindow {
    /// Window ending at `now` and starting exactly [`WINDOW_SECS`] earlier.
    pub fn trailing_48h<Tz: TimeZone>(now: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let start = now.clone() - TimeDelta::seconds(WINDOW_SECS);
        Self {
            start: start.format(DATE_FORMAT).to_string(),
            end: now.format(DATE_FORMAT).to_string(),
        }
    }
}

/// One alarm folded into the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub id: String,
    pub message: String,
}

/// Query path listing alarms of `severity` found inside `window`.
pub fn alarm_query(severity: Severity, window: &AlarmWindow) -> String {
    format!(
        "data/Alarms?severity={}&alarmFoundAt=between(\"{}\",\"{}\")",
        severity, window.start, window.end
    )
}

/// IDs are the text of each child element of the response root, in document order.
pub fn parse_alarm_ids(xml: &str) -> Result<Vec<String>> {
    let doc = roxmltree::Document::parse(xml)?;
    let ids = doc
        .root_element()
        .children()
        .filter(|node| node.is_element())
        .filter_map(|node| node.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    Ok(ids)
}

/// Text of the first `message` element below the root, verbatim. An empty element yields `""`.
pub fn parse_alarm_message(xml: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(xml)?;
    let node = doc
        .root_element()
        .descendants()
        .skip(1)
        .find(|node| node.has_tag_name("message"))
        .ok_or_else(|| NotifierError::MissingElement("message".into()))?;
    Ok(node.text().unwrap_or_default().to_string())
}

/// Lists IDs of alarms of `severity` found within `window`.
///
/// A failure is returned as an error and never as an empty list, so "no alarms"
/// and "could not ask" stay distinguishable.
pub fn fetch_alarm_ids(api: &PrimeClient, severity: Severity, window: &AlarmWindow) -> Result<Vec<String>> {
    let xml = api.get_xml(&alarm_query(severity, window))?;
    parse_alarm_ids(&xml)
}

/// Fetches the message of every alarm in `ids`, one request at a time.
pub fn fetch_alarms(api: &PrimeClient, ids: &[String]) -> Result<Vec<Alarm>> {
    let mut alarms = Vec::with_capacity(ids.len());
    for id in ids {
        let xml = api.get_xml(&format!("data/Alarms/{}", id))?;
        let alarm = Alarm {
            id: id.clone(),
            message: parse_alarm_message(&xml)?,
        };
        info!("Alarm {} fetched", alarm.id);
        println!("\t{}", alarm.message);
        println!();
        alarms.push(alarm);
    }
    Ok(alarms)
}
