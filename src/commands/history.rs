use anyhow::Result;
use eventcal_core::store::{EventStore, Storage};
use owo_colors::OwoColorize;

use crate::render::render_past_event;

pub fn run<S: Storage>(store: &EventStore<S>) -> Result<()> {
    let past = store.past_events();
    if past.is_empty() {
        println!("{}", "No past events".dimmed());
        return Ok(());
    }

    let rendered: Vec<String> = past.iter().map(render_past_event).collect();
    println!("{}", rendered.join("\n\n"));
    Ok(())
}
