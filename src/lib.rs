//! This crate is the calendar data engine of a date-organized personal task tracker.
//!
//! It covers the three pieces with actual algorithms in them:
//!
//! * the [`ical`] module translates between task records and the iCalendar
//!   interchange format, in both directions;
//! * the [`buckets`] module classifies a task collection into temporal
//!   windows (today / next-7 / next-28 / next-365-pinned) and produces the
//!   month grid used by the calendar view;
//! * the [`rollover`] module migrates overdue unfinished tasks forward, at
//!   most once per day.
//!
//! The [`store`] module persists the collection and the rollover marker to
//! JSON files, best-effort.
//!
//! Everything runs synchronously in the caller's thread, and the engine
//! never samples the clock on its own: "today" and "now" are explicit
//! parameters so that one invocation sees one consistent moment.

pub mod settings;

mod task;
pub use task::Task;

pub mod store;
pub use store::{MarkerStore, Store};

pub mod ical;

pub mod buckets;
pub use buckets::CalendarCell;

pub mod rollover;
