//! The event store: upcoming and past events, persisted as two JSON blobs.

use chrono::NaiveDateTime;
use tracing::{debug, error, info};

use super::storage::Storage;
use crate::error::StorageError;
use crate::event::Event;

/// Storage key for upcoming events.
pub const EVENTS_KEY: &str = "events";
/// Storage key for archived events.
pub const PAST_EVENTS_KEY: &str = "pastEvents";

/// Holds the two event lists and writes both back after every change.
///
/// The two keys are written one after the other; there is no transaction
/// spanning them.
pub struct EventStore<S: Storage> {
    storage: S,
    events: Vec<Event>,
    past_events: Vec<Event>,
}

impl<S: Storage> EventStore<S> {
    /// Load both lists from storage. Missing keys load as empty lists.
    pub async fn load(storage: S) -> Result<Self, StorageError> {
        let events = read_list(&storage, EVENTS_KEY).await?;
        let past_events = read_list(&storage, PAST_EVENTS_KEY).await?;

        debug!(
            events = events.len(),
            past_events = past_events.len(),
            "loaded event store"
        );

        Ok(EventStore {
            storage,
            events,
            past_events,
        })
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Upcoming and past events, in stored order.
    pub fn get_all(&self) -> (&[Event], &[Event]) {
        (&self.events, &self.past_events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn past_events(&self) -> &[Event] {
        &self.past_events
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Upcoming events ordered by start time.
    pub fn sorted_by_start(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.start);
        sorted
    }

    /// Replace both lists wholesale.
    pub async fn set_all(
        &mut self,
        events: Vec<Event>,
        past_events: Vec<Event>,
    ) -> Result<(), StorageError> {
        self.events = events;
        self.past_events = past_events;
        self.persist().await
    }

    pub async fn add(&mut self, event: Event) -> Result<(), StorageError> {
        info!(id = %event.id, name = %event.name, "adding event");
        self.events.push(event);
        self.persist().await
    }

    /// Replace the event with the same id. Returns false (and writes nothing)
    /// when no such event exists.
    pub async fn update(&mut self, event: Event) -> Result<bool, StorageError> {
        let Some(slot) = self.events.iter_mut().find(|e| e.id == event.id) else {
            return Ok(false);
        };

        info!(id = %event.id, name = %event.name, "updating event");
        *slot = event;
        self.persist().await?;
        Ok(true)
    }

    /// Update the event if its id is known, add it otherwise.
    pub async fn upsert(&mut self, event: Event) -> Result<(), StorageError> {
        self.upsert_in_memory(event);
        self.persist().await
    }

    /// Store every instance of an expanded series with a single write.
    pub async fn save_series(&mut self, series: Vec<Event>) -> Result<(), StorageError> {
        info!(count = series.len(), "saving event series");
        for event in series {
            self.upsert_in_memory(event);
        }
        self.persist().await
    }

    /// Remove the event with `id`. Returns false when nothing was removed.
    pub async fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);

        if self.events.len() == before {
            return Ok(false);
        }

        info!(id, "deleted event");
        self.persist().await?;
        Ok(true)
    }

    /// Move every event that ended before `now` into the history.
    ///
    /// Newly expired events go in front of the existing history. Returns how
    /// many events were moved.
    pub async fn archive_expired(&mut self, now: NaiveDateTime) -> Result<usize, StorageError> {
        let (expired, upcoming): (Vec<Event>, Vec<Event>) = std::mem::take(&mut self.events)
            .into_iter()
            .partition(|e| e.is_expired(now));

        self.events = upcoming;

        let moved = expired.len();
        if moved == 0 {
            return Ok(0);
        }

        let mut history = expired;
        history.append(&mut self.past_events);
        self.past_events = history;

        info!(moved, "archived expired events");
        self.persist().await?;
        Ok(moved)
    }

    fn upsert_in_memory(&mut self, event: Event) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event,
            None => self.events.push(event),
        }
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let result = async {
            write_list(&self.storage, EVENTS_KEY, &self.events).await?;
            write_list(&self.storage, PAST_EVENTS_KEY, &self.past_events).await
        }
        .await;

        if let Err(e) = &result {
            error!("Failed to save events: {}", e);
        }
        result
    }
}

async fn read_list<S: Storage>(storage: &S, key: &str) -> Result<Vec<Event>, StorageError> {
    match storage.get_item(key).await? {
        Some(content) => serde_json::from_str(&content).map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

async fn write_list<S: Storage>(
    storage: &S,
    key: &str,
    events: &[Event],
) -> Result<(), StorageError> {
    let content = serde_json::to_string(events).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::EventDraft;
    use crate::event::RepeatCadence;
    use crate::recurrence::expand;
    use crate::store::storage::{FileStorage, MemoryStorage};
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn event(id: &str, day: u32) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Event {id}"),
            start: at(day, 9),
            end: at(day, 10),
            repeat: RepeatCadence::None,
        }
    }

    async fn empty_store() -> EventStore<MemoryStorage> {
        EventStore::load(MemoryStorage::new()).await.unwrap()
    }

    #[tokio::test]
    async fn empty_storage_loads_empty_lists() {
        let store = empty_store().await;
        let (events, past) = store.get_all();
        assert!(events.is_empty());
        assert!(past.is_empty());
    }

    #[tokio::test]
    async fn persisted_lists_reload_unchanged() {
        let mut store = empty_store().await;
        let series = expand(&EventDraft::new(
            "Yoga",
            at(3, 18),
            at(3, 19),
            RepeatCadence::Weekly,
        ));
        store.save_series(series).await.unwrap();
        let upcoming = store.events().to_vec();
        store.set_all(upcoming, vec![event("old", 1)]).await.unwrap();

        let (events, past) = (store.events().to_vec(), store.past_events().to_vec());
        let storage = store.into_storage();
        let stored_events = storage.get_item(EVENTS_KEY).await.unwrap();

        let reloaded = EventStore::load(storage).await.unwrap();
        assert_eq!(reloaded.events(), events.as_slice());
        assert_eq!(reloaded.past_events(), past.as_slice());

        // Writing the reloaded lists again produces the same bytes.
        let storage = reloaded.into_storage();
        let reloaded = EventStore::load(storage).await.unwrap();
        let rewritten = serde_json::to_string(reloaded.events()).unwrap();
        assert_eq!(stored_events.as_deref(), Some(rewritten.as_str()));
    }

    #[tokio::test]
    async fn update_replaces_by_id_and_ignores_unknown() {
        let mut store = empty_store().await;
        store.add(event("a", 5)).await.unwrap();

        let mut changed = event("a", 6);
        changed.name = "Renamed".to_string();
        assert!(store.update(changed).await.unwrap());
        assert_eq!(store.find("a").unwrap().name, "Renamed");

        assert!(!store.update(event("missing", 6)).await.unwrap());
        assert_eq!(store.events().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_only_matching_event() {
        let mut store = empty_store().await;
        store.add(event("a", 5)).await.unwrap();
        store.add(event("b", 6)).await.unwrap();

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.events()[0].id, "b");
    }

    #[tokio::test]
    async fn editing_a_series_replaces_the_original_event() {
        let mut store = empty_store().await;
        store.add(event("orig", 5)).await.unwrap();

        let draft = EventDraft::new("Moved", at(8, 9), at(8, 10), RepeatCadence::BiWeekly)
            .with_id("orig");
        store.save_series(expand(&draft)).await.unwrap();

        assert_eq!(store.events().len(), 10);
        let orig = store.find("orig").unwrap();
        assert_eq!(orig.name, "Moved");
        assert_eq!(orig.start, at(8, 9));
    }

    #[tokio::test]
    async fn editing_one_instance_of_a_series_starts_a_new_series() {
        let mut store = empty_store().await;
        let original = expand(&EventDraft::new(
            "Yoga",
            at(1, 18),
            at(1, 19),
            RepeatCadence::Weekly,
        ));
        store.save_series(original.clone()).await.unwrap();

        // Only the edited instance is replaced; its siblings stay as they were.
        let edited = &original[2];
        let draft = EventDraft::new("Yoga (late)", at(15, 20), at(15, 21), RepeatCadence::Weekly)
            .with_id(edited.id.clone());
        store.save_series(expand(&draft)).await.unwrap();

        assert_eq!(store.events().len(), 19);
        assert_eq!(store.find(&edited.id).unwrap().name, "Yoga (late)");
        for sibling in original.iter().filter(|e| e.id != edited.id) {
            assert_eq!(store.find(&sibling.id), Some(sibling));
        }
        let late = store.events().iter().filter(|e| e.name == "Yoga (late)").count();
        assert_eq!(late, 10);
    }

    #[tokio::test]
    async fn archive_moves_expired_events_to_front_of_history() {
        let mut store = empty_store().await;
        store
            .set_all(
                vec![event("past", 2), event("future", 20), event("also-past", 3)],
                vec![event("ancient", 1)],
            )
            .await
            .unwrap();

        let moved = store.archive_expired(at(10, 0)).await.unwrap();
        assert_eq!(moved, 2);

        let ids = |events: &[Event]| events.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(store.events()), ["future"]);
        assert_eq!(ids(store.past_events()), ["past", "also-past", "ancient"]);

        assert_eq!(store.archive_expired(at(10, 0)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sorted_by_start_orders_upcoming_events() {
        let mut store = empty_store().await;
        store.add(event("late", 9)).await.unwrap();
        store.add(event("early", 4)).await.unwrap();

        let sorted: Vec<&str> = store.sorted_by_start().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(sorted, ["early", "late"]);
    }

    #[tokio::test]
    async fn write_failures_are_reported() {
        let mut store = EventStore::load(MemoryStorage::read_only()).await.unwrap();
        let result = store.add(event("a", 5)).await;
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[tokio::test]
    async fn corrupt_blob_is_a_decode_error() {
        let storage = MemoryStorage::new();
        storage.set_item(EVENTS_KEY, "{not json").await.unwrap();

        let result = EventStore::load(storage).await;
        assert!(matches!(result, Err(StorageError::Decode { ref key, .. }) if key == EVENTS_KEY));
    }

    #[tokio::test]
    async fn reads_blobs_in_the_stored_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("events.json"),
            r#"[{"id":"x1","name":"Dentist","startDate":"2024-01-05T09:00:00","endDate":"2024-01-05T09:30:00","repeatOption":"Bi-weekly"}]"#,
        )
        .unwrap();

        let store = EventStore::load(FileStorage::new(dir.path())).await.unwrap();
        let event = store.find("x1").unwrap();
        assert_eq!(event.name, "Dentist");
        assert_eq!(event.repeat, RepeatCadence::BiWeekly);
        assert!(store.past_events().is_empty());
    }
}
