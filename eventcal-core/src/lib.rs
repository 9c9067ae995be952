//! Core of eventcal.
//!
//! - `event`/`draft` for the event model and form input
//! - `recurrence` to expand a draft into a series of events
//! - `marker` and `selection` for calendar day highlighting
//! - `store` for persisting events through a key-value storage

pub mod config;
pub mod draft;
pub mod error;
pub mod event;
pub mod marker;
pub mod recurrence;
pub mod selection;
pub mod store;

pub use draft::EventDraft;
pub use error::{DraftError, EventCalError, EventCalResult, StorageError};
pub use event::{Event, RepeatCadence};
