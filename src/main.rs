mod commands;
mod input;
mod navigation;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventcal_core::RepeatCadence;
use eventcal_core::config::EventCalConfig;
use eventcal_core::store::{EventStore, FileStorage};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::edit::EditArgs;

#[derive(Parser)]
#[command(name = "eventcal")]
#[command(about = "Create, list and archive calendar events with simple recurrence")]
struct Cli {
    /// Without a subcommand, eventcal starts in interactive mode
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming events (past events are moved to history first)
    List,
    /// Show past events
    History,
    /// Create an event, or a series of events when it repeats
    Add {
        name: String,

        /// Day of the event (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (e.g. "09:30" or "9:30am")
        #[arg(short, long)]
        start: String,

        /// End time (defaults to the start time)
        #[arg(short, long)]
        end: Option<String>,

        /// none, weekly, bi-weekly or monthly
        #[arg(short, long, default_value = "none")]
        repeat: RepeatCadence,
    },
    /// Change an existing event
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        repeat: Option<RepeatCadence>,
    },
    /// Delete an event by id
    Delete { id: String },
    /// Move events that have ended into history
    Archive,
    /// Select a date range by tapping days in order (YYYY-MM-DD)
    Mark {
        #[arg(required = true)]
        dates: Vec<String>,

        /// Print the marked days as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a month with one day marked
    Show {
        /// Day to mark (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = EventCalConfig::load()?;

    match cli.command {
        Some(Commands::Mark { dates, json }) => commands::mark::run(&dates, json, &config),
        Some(Commands::Show { date, json }) => commands::mark::show(date, json, &config),
        command => {
            let mut store = open_store(&config).await?;
            run_with_store(command, &mut store, &config).await
        }
    }
}

async fn run_with_store(
    command: Option<Commands>,
    store: &mut EventStore<FileStorage>,
    config: &EventCalConfig,
) -> Result<()> {
    match command {
        None => commands::interactive::run(store, config).await,
        Some(Commands::List) => commands::list::run(store, commands::now()).await,
        Some(Commands::History) => commands::history::run(store),
        Some(Commands::Add {
            name,
            date,
            start,
            end,
            repeat,
        }) => commands::add::run(store, name, date, start, end, repeat).await,
        Some(Commands::Edit {
            id,
            name,
            date,
            start,
            end,
            repeat,
        }) => {
            let args = EditArgs {
                name,
                date,
                start,
                end,
                repeat,
            };
            commands::edit::run(store, &id, args).await
        }
        Some(Commands::Delete { id }) => commands::delete::run(store, &id).await,
        Some(Commands::Archive) => commands::archive::run(store, commands::now()).await,
        Some(Commands::Mark { .. } | Commands::Show { .. }) => {
            unreachable!("mark and show run without the event store")
        }
    }
}

async fn open_store(config: &EventCalConfig) -> Result<EventStore<FileStorage>> {
    let storage = config.storage();
    debug!(dir = %storage.dir().display(), "opening event store");

    EventStore::load(storage)
        .await
        .with_context(|| format!("Failed to load events from {}", config.data_path().display()))
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    Ok(())
}
