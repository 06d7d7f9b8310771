//! Formatting and arithmetic on freeze-date labels.

use chrono::NaiveDate;
use regex_lite::Regex;
use std::sync::LazyLock;

/// Published placeholder for a frost date that could not be computed.
pub const FROST_DATE_SENTINEL: f64 = -9999.0;

/// Non-leap year in which freeze dates are interpreted.
pub const REFERENCE_YEAR: i32 = 2023;

static MONTH_DAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("month/day pattern compiles"));

/// True for `-9999`, `-9999.0` and other spellings of the sentinel.
pub fn is_sentinel(raw: &str) -> bool {
    raw.trim()
        .parse::<f64>()
        .is_ok_and(|value| value == FROST_DATE_SENTINEL)
}

/// Formats a `MM/DD` value as `"<Month name> <DD>"` (`"03/15"` becomes `"March 15"`).
///
/// Anything else, including `MM/DD` text that is not a real day of the
/// reference year, is returned unchanged.
pub fn format_freeze_date(value: &str) -> String {
    if !MONTH_DAY_PATTERN.is_match(value) {
        return value.to_string();
    }
    match NaiveDate::parse_from_str(&format!("{}/{}", value, REFERENCE_YEAR), "%m/%d/%Y") {
        Ok(date) => date.format("%B %d").to_string(),
        Err(_) => value.to_string(),
    }
}

fn parse_label(label: &str, year: i32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{} {}", label.trim(), year), "%B %d %Y").ok()
}

/// Days from the last spring freeze to the first fall freeze.
///
/// Both labels are read in the reference year. A negative difference means the
/// first freeze falls in the following year. Returns `None` when either label is
/// not a `"<Month name> <day>"` date.
pub fn growing_days(last_freeze: &str, first_freeze: &str) -> Option<u32> {
    let start = parse_label(last_freeze, REFERENCE_YEAR)?;
    let mut end = parse_label(first_freeze, REFERENCE_YEAR)?;
    if end < start {
        end = parse_label(first_freeze, REFERENCE_YEAR + 1)?;
    }
    u32::try_from((end - start).num_days()).ok()
}
