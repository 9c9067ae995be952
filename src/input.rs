//! Parsing of dates and times typed by the user.

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveTime};

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!("Invalid date format '{}'. Expected YYYY-MM-DD", s),
    }
}

/// Parse a time of day: 24-hour "15:30" or 12-hour "3:30pm" / "3:30 PM".
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let compact = s.trim().replace(' ', "").to_uppercase();

    if let Ok(time) = NaiveTime::parse_from_str(&compact, "%H:%M") {
        return Ok(time);
    }
    if let Ok(time) = NaiveTime::parse_from_str(&compact, "%I:%M%p") {
        return Ok(time);
    }

    bail!("Invalid time format '{}'. Expected HH:MM (e.g. 09:30 or 9:30pm)", s)
}
