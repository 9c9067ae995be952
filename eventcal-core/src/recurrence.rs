//! Recurring event expansion.
//!
//! A draft with a repeat cadence becomes a fixed-length series of concrete
//! events. Each instance shifts both start and end by the cadence's day
//! interval, so the time of day never changes across the series.

use chrono::Duration;
use tracing::{debug, warn};

use crate::draft::EventDraft;
use crate::event::{Event, generate_id};

/// Number of instances generated for any repeating cadence.
pub const SERIES_LENGTH: usize = 10;

/// Expand a draft into the events to persist.
///
/// - One-off drafts produce a single event.
/// - Repeating drafts produce [`SERIES_LENGTH`] events.
///
/// The first instance reuses the draft's id when it has one; every other
/// instance gets a freshly generated id. A series that would run past the
/// last representable date stops early.
pub fn expand(draft: &EventDraft) -> Vec<Event> {
    expand_with(draft, generate_id)
}

/// Same as [`expand`] with a caller-supplied id generator.
pub fn expand_with(draft: &EventDraft, mut next_id: impl FnMut() -> String) -> Vec<Event> {
    let first = Event {
        id: draft.id.clone().unwrap_or_else(&mut next_id),
        name: draft.name.clone(),
        start: draft.start,
        end: draft.end,
        repeat: draft.repeat,
    };

    let Some(interval) = draft.repeat.interval_days() else {
        return vec![first];
    };

    let step = Duration::days(interval);
    let mut events = Vec::with_capacity(SERIES_LENGTH);
    events.push(first);

    for k in 1..SERIES_LENGTH as i32 {
        let offset = step * k;
        let (Some(start), Some(end)) = (
            draft.start.checked_add_signed(offset),
            draft.end.checked_add_signed(offset),
        ) else {
            warn!(name = %draft.name, count = events.len(), "series truncated at end of calendar");
            break;
        };
        events.push(Event {
            id: next_id(),
            name: draft.name.clone(),
            start,
            end,
            repeat: draft.repeat,
        });
    }

    debug!(
        name = %draft.name,
        cadence = %draft.repeat,
        count = events.len(),
        "expanded recurring event"
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RepeatCadence;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};
    use std::collections::HashSet;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn draft(repeat: RepeatCadence) -> EventDraft {
        EventDraft::new("Standup", at(2024, 1, 5, 9, 15), at(2024, 1, 5, 9, 45), repeat)
    }

    #[test]
    fn one_off_yields_single_event_with_draft_id() {
        let events = expand(&draft(RepeatCadence::None).with_id("existing"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "existing");
        assert_eq!(events[0].start, at(2024, 1, 5, 9, 15));
    }

    #[test]
    fn one_off_without_id_gets_generated_id() {
        let events = expand(&draft(RepeatCadence::None));
        assert_eq!(events.len(), 1);
        assert!(!events[0].id.is_empty());
    }

    #[test]
    fn repeating_cadences_yield_ten_instances_at_fixed_steps() {
        for (cadence, days) in [
            (RepeatCadence::Weekly, 7),
            (RepeatCadence::BiWeekly, 14),
            (RepeatCadence::Monthly, 30),
        ] {
            let events = expand(&draft(cadence));
            assert_eq!(events.len(), SERIES_LENGTH, "{cadence}");

            let first = &events[0];
            for (k, event) in events.iter().enumerate() {
                let offset = Duration::days(days * k as i64);
                assert_eq!(event.start, first.start + offset, "{cadence} #{k}");
                assert_eq!(event.end, first.end + offset, "{cadence} #{k}");
                assert_eq!(event.start.time(), first.start.time());
                assert_eq!(event.end.time().minute(), 45);
                assert_eq!(event.name, "Standup");
                assert_eq!(event.repeat, cadence);
            }
        }
    }

    #[test]
    fn monthly_is_thirty_days_not_calendar_months() {
        let events = expand(&draft(RepeatCadence::Monthly));
        assert_eq!(events[1].start, at(2024, 2, 4, 9, 15));
        assert_eq!(events[2].start, at(2024, 3, 5, 9, 15));
    }

    #[test]
    fn ids_are_pairwise_distinct_and_first_is_kept() {
        let events = expand(&draft(RepeatCadence::Weekly).with_id("edit-me"));
        assert_eq!(events[0].id, "edit-me");

        let ids: HashSet<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn series_stops_at_the_last_representable_date() {
        let last = NaiveDate::MAX.and_hms_opt(9, 0, 0).unwrap();
        let start = last - Duration::days(20);
        let draft = EventDraft::new("Far future", start, start, RepeatCadence::Weekly);

        let events = expand(&draft);
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].start, start + Duration::days(14));
    }

    #[test]
    fn custom_id_generator_is_used_for_fresh_ids() {
        let mut n = 0;
        let events = expand_with(&draft(RepeatCadence::BiWeekly), || {
            n += 1;
            format!("id-{n}")
        });
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids[0], "id-1");
        assert_eq!(ids[9], "id-10");
    }
}
