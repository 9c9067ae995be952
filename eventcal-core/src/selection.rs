//! Interactive date range selection.
//!
//! Each tap on the calendar supplies one date. The selector tracks where the
//! user is in picking a range and what to do with a tap once a range is
//! already complete.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::marker::{MarkedDates, MarkerPalette, Selection, mark};

/// What a tap does after a full range has been chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterCompletePolicy {
    /// Start a new range at the tapped day.
    #[default]
    Reset,
    /// Grow the range to the tapped day, or move the nearer endpoint when the
    /// tap lands inside it.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Single(NaiveDate),
    Complete { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone)]
pub struct RangeSelector {
    state: SelectionState,
    policy: AfterCompletePolicy,
}

impl RangeSelector {
    pub fn new(policy: AfterCompletePolicy) -> Self {
        RangeSelector {
            state: SelectionState::Empty,
            policy,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn policy(&self) -> AfterCompletePolicy {
        self.policy
    }

    /// Apply one tap and return the new state.
    pub fn tap(&mut self, day: NaiveDate) -> SelectionState {
        self.state = match self.state {
            SelectionState::Empty => SelectionState::Single(day),
            SelectionState::Single(start) if day == start => SelectionState::Single(start),
            SelectionState::Single(start) if day < start => SelectionState::Complete {
                start: day,
                end: start,
            },
            SelectionState::Single(start) => SelectionState::Complete { start, end: day },
            SelectionState::Complete { start, end } => match self.policy {
                AfterCompletePolicy::Reset => SelectionState::Single(day),
                AfterCompletePolicy::Extend => extend(start, end, day),
            },
        };
        self.state
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
    }

    /// Current `(start, end)`; a single picked day is its own range.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.state {
            SelectionState::Empty => None,
            SelectionState::Single(day) => Some((day, day)),
            SelectionState::Complete { start, end } => Some((start, end)),
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.bounds()
            .map(|(start, end)| Selection::Range { start, end })
    }

    /// Marked days for the current state (empty before the first tap).
    pub fn marked_dates(&self, palette: &MarkerPalette) -> MarkedDates {
        self.selection()
            .map(|selection| mark(&selection, palette))
            .unwrap_or_default()
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::new(AfterCompletePolicy::default())
    }
}

fn extend(start: NaiveDate, end: NaiveDate, day: NaiveDate) -> SelectionState {
    if day < start {
        return SelectionState::Complete { start: day, end };
    }
    if day > end {
        return SelectionState::Complete { start, end: day };
    }

    // Inside the range: move whichever endpoint is closer, ties go to the end.
    if (day - start) < (end - day) {
        SelectionState::Complete { start: day, end }
    } else {
        SelectionState::Complete { start, end: day }
    }
}
