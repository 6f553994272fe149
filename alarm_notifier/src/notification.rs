//! Composes the single summary that is posted to Spark and read out by Tropo.
use std::fmt::Write;

use crate::alarms::{Alarm, Severity};

const CLOSING: &str = "Goodbye... And Good Luck.";

/// Header, one numbered entry per alarm (1-based, by position), closing phrase.
pub fn build_notification(severity: Severity, alarms: &[Alarm]) -> String {
    let mut message = format!(
        "There were a total of {} {} alerts in the last 48 hours. ",
        alarms.len(),
        severity.label()
    );
    for (index, alarm) in alarms.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = write!(message, "Alert number {}. {} ", index + 1, alarm.message);
    }
    message.push_str(CLOSING);
    message
}
