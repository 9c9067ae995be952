//! Event drafts: what the add/edit form collects before expansion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DraftError;
use crate::event::{Event, RepeatCadence};

/// An event as entered by the user, before it is expanded into instances.
///
/// `id` is set when editing an existing event so that the first expanded
/// instance replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub id: Option<String>,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub repeat: RepeatCadence,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        repeat: RepeatCadence,
    ) -> Self {
        EventDraft {
            id: None,
            name: name.into(),
            start,
            end,
            repeat,
        }
    }

    /// Build a draft from a picked day plus start and end times.
    ///
    /// An end time earlier than the start time is raised to the start time,
    /// the same way the time picker bumps the end when the start moves past it.
    pub fn on_day(
        name: impl Into<String>,
        day: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        repeat: RepeatCadence,
    ) -> Self {
        let end_time = end_time.max(start_time);
        Self::new(name, day.and_time(start_time), day.and_time(end_time), repeat)
    }

    /// Pre-fill a draft from a stored event (edit mode).
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            id: Some(event.id.clone()),
            name: event.name.clone(),
            start: event.start,
            end: event.end,
            repeat: event.repeat,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        Ok(())
    }
}
