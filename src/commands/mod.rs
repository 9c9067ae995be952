pub mod add;
pub mod archive;
pub mod delete;
pub mod edit;
pub mod history;
pub mod interactive;
pub mod list;
pub mod mark;

use chrono::{Local, NaiveDateTime};

/// Current local wall-clock time, the clock events are stored in.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
