use anyhow::{Context, Result, bail};
use eventcal_core::store::{EventStore, Storage};
use owo_colors::OwoColorize;

pub async fn run<S: Storage>(store: &mut EventStore<S>, id: &str) -> Result<()> {
    let name = match store.find(id) {
        Some(event) => event.name.clone(),
        None => bail!("Event '{}' not found", id),
    };

    store
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete '{}'", name))?;

    println!("{}", format!("  Deleted: {}", name).red());
    Ok(())
}
