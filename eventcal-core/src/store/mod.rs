//! Event persistence.

mod event_store;
mod storage;

pub use event_store::{EVENTS_KEY, EventStore, PAST_EVENTS_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
