use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use eventcal_core::store::{EventStore, Storage};
use owo_colors::OwoColorize;

use crate::render::render_event;

/// Home: archive anything that has ended, then list what is left by start time.
pub async fn run<S: Storage>(store: &mut EventStore<S>, now: NaiveDateTime) -> Result<()> {
    store
        .archive_expired(now)
        .await
        .context("Failed to archive past events")?;

    let events = store.sorted_by_start();
    if events.is_empty() {
        println!("{}", "No events yet".dimmed());
        return Ok(());
    }

    let rendered: Vec<String> = events.iter().map(|e| render_event(e)).collect();
    println!("{}", rendered.join("\n\n"));
    Ok(())
}
