//! Simulator output contract: two named fields grepped out of free text.
//!
//! The simulator prints a progress log, not a schema. Somewhere in it we expect
//! `<k>/33` (sensors visited out of 33) and `Battery: <n>`. Both are first-match
//! searches over the whole text.

use std::sync::OnceLock;

use regex::Regex;

/// Total number of sensors the simulator reports against.
pub const SENSOR_TOTAL: u32 = 33;

/// Result of parsing one run's stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed { sensors: u32, battery: i64 },
    Unparseable { raw: String },
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed { .. })
    }
}

fn sensors_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(\d+)/{}", SENSOR_TOTAL)).expect("sensors pattern is valid")
    })
}

fn battery_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Battery:[ \t]+(\d+)").expect("battery pattern is valid"))
}

fn first_capture<T: std::str::FromStr>(re: &Regex, text: &str) -> Option<T> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Sensors-found count, if present.
pub fn find_sensors(text: &str) -> Option<u32> {
    first_capture(sensors_pattern(), text)
}

/// Battery level, if present.
pub fn find_battery(text: &str) -> Option<i64> {
    first_capture(battery_pattern(), text)
}

/// Extract both fields. Either one missing yields `Unparseable`.
///
/// Only the first match of each pattern is considered: if that first value is
/// too large for its type the output is `Unparseable`, even when a later match
/// would fit.
pub fn parse_output(text: &str) -> ParseOutcome {
    match (find_sensors(text), find_battery(text)) {
        (Some(sensors), Some(battery)) => ParseOutcome::Parsed { sensors, battery },
        _ => ParseOutcome::Unparseable {
            raw: text.to_string(),
        },
    }
}
