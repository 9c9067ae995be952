//! Event types.
//!
//! An `Event` is one concrete occurrence on the calendar. Recurring series are
//! stored as independent events that happen to share a name and cadence;
//! there is no master/instance relationship once they are persisted.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar event as persisted by the event store.
///
/// Field names on the wire follow the stored JSON blobs
/// (`startDate`, `endDate`, `repeatOption`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// Local wall-clock start
    #[serde(rename = "startDate")]
    pub start: NaiveDateTime,
    /// Local wall-clock end
    #[serde(rename = "endDate")]
    pub end: NaiveDateTime,
    #[serde(rename = "repeatOption")]
    pub repeat: RepeatCadence,
}

impl Event {
    /// True once the event has finished relative to `now`.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.end < now
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Generate a fresh opaque event id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// How often an event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepeatCadence {
    #[default]
    None,
    Weekly,
    #[serde(rename = "Bi-weekly")]
    BiWeekly,
    Monthly,
}

impl RepeatCadence {
    pub const ALL: [RepeatCadence; 4] = [
        RepeatCadence::None,
        RepeatCadence::Weekly,
        RepeatCadence::BiWeekly,
        RepeatCadence::Monthly,
    ];

    /// Days between consecutive instances, or `None` for one-off events.
    ///
    /// Monthly is a fixed 30-day step, not calendar-month arithmetic.
    pub fn interval_days(self) -> Option<i64> {
        match self {
            RepeatCadence::None => None,
            RepeatCadence::Weekly => Some(7),
            RepeatCadence::BiWeekly => Some(14),
            RepeatCadence::Monthly => Some(30),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatCadence::None => "None",
            RepeatCadence::Weekly => "Weekly",
            RepeatCadence::BiWeekly => "Bi-weekly",
            RepeatCadence::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for RepeatCadence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RepeatCadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "none" | "" => Ok(RepeatCadence::None),
            "weekly" => Ok(RepeatCadence::Weekly),
            "bi-weekly" | "biweekly" => Ok(RepeatCadence::BiWeekly),
            "monthly" => Ok(RepeatCadence::Monthly),
            other => Err(format!(
                "Unknown repeat option '{}'. Expected none, weekly, bi-weekly or monthly",
                other
            )),
        }
    }
}
