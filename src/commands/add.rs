use anyhow::{Context, Result};
use chrono::Local;
use eventcal_core::recurrence::expand;
use eventcal_core::store::{EventStore, Storage};
use eventcal_core::{Event, EventDraft, RepeatCadence};
use owo_colors::OwoColorize;

use crate::input::{parse_date, parse_time};

pub async fn run<S: Storage>(
    store: &mut EventStore<S>,
    name: String,
    date: Option<String>,
    start: String,
    end: Option<String>,
    repeat: RepeatCadence,
) -> Result<()> {
    let day = match date {
        Some(d) => parse_date(&d)?,
        None => Local::now().date_naive(),
    };
    let start_time = parse_time(&start)?;
    let end_time = match end {
        Some(e) => parse_time(&e)?,
        None => start_time,
    };

    let draft = EventDraft::on_day(name, day, start_time, end_time, repeat);
    let created = save_draft(store, &draft).await?;

    print_saved("Created", &created);
    Ok(())
}

/// Validate, expand and store a draft. Returns every stored instance.
pub async fn save_draft<S: Storage>(
    store: &mut EventStore<S>,
    draft: &EventDraft,
) -> Result<Vec<Event>> {
    draft.validate()?;

    let series = expand(draft);
    store
        .save_series(series.clone())
        .await
        .context("Failed to save events")?;

    Ok(series)
}

pub fn print_saved(verb: &str, series: &[Event]) {
    let Some(first) = series.first() else {
        return;
    };

    println!("{}", format!("  {}: {}", verb, first.name).green());
    if series.len() > 1 {
        println!(
            "{}",
            format!("  {} occurrences, repeating {}", series.len(), first.repeat).dimmed()
        );
    }
}
