//! Interactive mode: the Home, EventAdd and EventHistory screens.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveTime};
use dialoguer::{Input, Select};
use eventcal_core::config::EventCalConfig;
use eventcal_core::marker::{Selection, mark};
use eventcal_core::store::{EventStore, Storage};
use eventcal_core::{DraftError, Event, EventDraft, RepeatCadence};
use owo_colors::OwoColorize;
use tracing::warn;

use super::add::{print_saved, save_draft};
use super::now;
use crate::input::{parse_date, parse_time};
use crate::navigation::{Navigator, Screen};
use crate::render::{event_label, render_event, render_month, render_past_event};

const HOME_ACTIONS: [&str; 5] = ["Add event", "Edit event", "Delete event", "History", "Quit"];

pub async fn run<S: Storage>(store: &mut EventStore<S>, config: &EventCalConfig) -> Result<()> {
    let mut nav = Navigator::new();

    // Failing to archive only affects what is shown as upcoming.
    if let Err(e) = store.archive_expired(now()).await {
        warn!("Could not archive past events: {}", e);
    }

    loop {
        println!("\n{}", nav.current().title().bold());

        match nav.current().clone() {
            Screen::Home => {
                if !home(store, &mut nav).await? {
                    return Ok(());
                }
            }
            Screen::EventAdd { event } => {
                event_add(store, config, event.as_ref()).await?;
                nav.go_back();
            }
            Screen::EventHistory => {
                history(store)?;
                nav.go_back();
            }
        }
    }
}

/// Returns false when the user quits.
async fn home<S: Storage>(store: &mut EventStore<S>, nav: &mut Navigator) -> Result<bool> {
    let events: Vec<Event> = store.sorted_by_start().into_iter().cloned().collect();

    if events.is_empty() {
        println!("{}", "No events yet".dimmed());
    } else {
        for event in &events {
            println!("{}\n", render_event(event));
        }
    }

    let action = Select::new()
        .with_prompt("  What next?")
        .items(&HOME_ACTIONS)
        .default(0)
        .interact()?;

    match HOME_ACTIONS[action] {
        "Add event" => nav.navigate(Screen::EventAdd { event: None }),
        "Edit event" => {
            if let Some(event) = pick_event(&events, "  Edit which event?")? {
                nav.navigate(Screen::EventAdd { event: Some(event) });
            }
        }
        "Delete event" => {
            if let Some(event) = pick_event(&events, "  Delete which event?")? {
                match store.delete(&event.id).await {
                    Ok(_) => println!("{}", format!("  Deleted: {}", event.name).red()),
                    Err(e) => eprintln!("  {}", format!("Could not delete event: {}", e).red()),
                }
            }
        }
        "History" => nav.navigate(Screen::EventHistory),
        _ => return Ok(false),
    }

    Ok(true)
}

fn pick_event(events: &[Event], prompt: &str) -> Result<Option<Event>> {
    if events.is_empty() {
        println!("{}", "  No events to choose from".dimmed());
        return Ok(None);
    }

    let labels: Vec<String> = events.iter().map(event_label).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(events.get(index).cloned())
}

async fn event_add<S: Storage>(
    store: &mut EventStore<S>,
    config: &EventCalConfig,
    editing: Option<&Event>,
) -> Result<()> {
    let default_start = editing
        .map(|e| e.start)
        .unwrap_or_else(|| Local::now().naive_local());
    let default_end = editing.map(|e| e.end).unwrap_or(default_start);

    let name: String = Input::new()
        .with_prompt("  Event name")
        .with_initial_text(editing.map(|e| e.name.clone()).unwrap_or_default())
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err(DraftError::EmptyName.to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let day = prompt_with_retry(
        "  Date (YYYY-MM-DD)",
        &default_start.date().format("%Y-%m-%d").to_string(),
        parse_date,
    )?;

    let marked = mark(&Selection::Day(day), &config.marker);
    println!("{}", render_month(day.year(), day.month(), &marked, &config.marker));

    let start_time = prompt_time("  Start time", default_start.time())?;
    let end_time = prompt_time("  End time", default_end.time())?;

    let current = editing.map(|e| e.repeat).unwrap_or_default();
    let labels: Vec<&str> = RepeatCadence::ALL.iter().map(|c| c.label()).collect();
    let repeat_index = Select::new()
        .with_prompt("  Repeat")
        .items(&labels)
        .default(RepeatCadence::ALL.iter().position(|c| *c == current).unwrap_or(0))
        .interact()?;
    let repeat = RepeatCadence::ALL[repeat_index];

    let mut draft = EventDraft::on_day(name, day, start_time, end_time, repeat);
    if let Some(event) = editing {
        draft = draft.with_id(event.id.clone());
    }

    match save_draft(store, &draft).await {
        Ok(saved) => print_saved(if editing.is_some() { "Updated" } else { "Created" }, &saved),
        Err(e) => eprintln!("  {}", format!("{:#}", e).red()),
    }
    Ok(())
}

fn history<S: Storage>(store: &EventStore<S>) -> Result<()> {
    let past = store.past_events();
    if past.is_empty() {
        println!("{}", "No past events".dimmed());
    } else {
        for event in past {
            println!("{}\n", render_past_event(event));
        }
    }

    Select::new()
        .items(&["Back"])
        .default(0)
        .interact()?;
    Ok(())
}

fn prompt_time(prompt: &str, default: NaiveTime) -> Result<NaiveTime> {
    prompt_with_retry(prompt, &default.format("%H:%M").to_string(), parse_time)
}

/// Prompt with a pre-filled value, asking again on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, initial: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
