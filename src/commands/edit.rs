use anyhow::{Result, anyhow};
use eventcal_core::store::{EventStore, Storage};
use eventcal_core::{Event, EventDraft, RepeatCadence};

use super::add::{print_saved, save_draft};
use crate::input::{parse_date, parse_time};

/// Fields given on the command line; anything unset keeps its current value.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub name: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub repeat: Option<RepeatCadence>,
}

pub async fn run<S: Storage>(store: &mut EventStore<S>, id: &str, args: EditArgs) -> Result<()> {
    let existing = store
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("Event '{}' not found", id))?;

    let draft = edited_draft(&existing, args)?;
    let saved = save_draft(store, &draft).await?;

    print_saved("Updated", &saved);
    Ok(())
}

/// Apply edits on top of an existing event. The result keeps the event's id.
pub fn edited_draft(existing: &Event, args: EditArgs) -> Result<EventDraft> {
    let day = match args.date {
        Some(d) => parse_date(&d)?,
        None => existing.start.date(),
    };
    let start_time = match args.start {
        Some(s) => parse_time(&s)?,
        None => existing.start.time(),
    };
    let end_time = match args.end {
        Some(e) => parse_time(&e)?,
        None => existing.end.time(),
    };

    let draft = EventDraft::on_day(
        args.name.unwrap_or_else(|| existing.name.clone()),
        day,
        start_time,
        end_time,
        args.repeat.unwrap_or(existing.repeat),
    );

    Ok(draft.with_id(existing.id.clone()))
}
