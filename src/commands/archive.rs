use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use eventcal_core::store::{EventStore, Storage};
use owo_colors::OwoColorize;

pub async fn run<S: Storage>(store: &mut EventStore<S>, now: NaiveDateTime) -> Result<()> {
    let moved = store
        .archive_expired(now)
        .await
        .context("Failed to archive past events")?;

    match moved {
        0 => println!("{}", "Nothing to archive".dimmed()),
        1 => println!("  Moved 1 event to history"),
        n => println!("  Moved {} events to history", n),
    }
    Ok(())
}
