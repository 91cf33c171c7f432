//! Read-side projections over the task collection
//!
//! Everything in here is a pure function of `(tasks, reference date)`. The
//! reference date ("today") is always injected by the caller, never sampled
//! from the clock, so a single render sees one consistent notion of now.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::task::Task;

/// One cell of the month grid. Derived on demand, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    /// Whether the cell belongs to the focused month (as opposed to the
    /// trailing days of the previous month or the leading days of the next)
    pub in_focused_month: bool,
    pub is_today: bool,
}

/// Tasks whose date is exactly `date`.
pub fn tasks_on_date<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.date() == date).collect()
}

/// Tasks falling on days 1..=7 after the reference date.
pub fn next_7_days<'a>(tasks: &'a [Task], reference: NaiveDate) -> Vec<&'a Task> {
    tasks_in_window(tasks, reference, 1, 7)
}

/// Tasks falling on days 8..=28 after the reference date (the first week is
/// covered by [`next_7_days`]).
pub fn next_28_days<'a>(tasks: &'a [Task], reference: NaiveDate) -> Vec<&'a Task> {
    tasks_in_window(tasks, reference, 8, 28)
}

/// Pinned tasks falling on days 29..=365 after the reference date.
/// Unpinned far-future tasks are left out to keep the overview bounded.
pub fn next_365_pinned<'a>(tasks: &'a [Task], reference: NaiveDate) -> Vec<&'a Task> {
    tasks_in_window(tasks, reference, 29, 365)
        .into_iter()
        .filter(|t| t.pinned())
        .collect()
}

/// Select tasks by membership in the enumerated date set
/// `reference + first_offset ..= reference + last_offset`.
fn tasks_in_window<'a>(
    tasks: &'a [Task],
    reference: NaiveDate,
    first_offset: i64,
    last_offset: i64,
) -> Vec<&'a Task> {
    let days = window_dates(reference, first_offset, last_offset);
    tasks.iter().filter(|t| days.contains(&t.date())).collect()
}

fn window_dates(reference: NaiveDate, first_offset: i64, last_offset: i64) -> HashSet<NaiveDate> {
    (first_offset..=last_offset)
        .map(|offset| reference + Duration::days(offset))
        .collect()
}

/// Whether a task matches a free-text query: case-insensitive substring of
/// the text or of any tag. The empty query matches everything.
pub fn matches_filter(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.tags()
        .iter()
        .any(|tag| tag.to_lowercase().contains(&needle))
        || task.text().to_lowercase().contains(&needle)
}

pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| matches_filter(t, query))
        .collect()
}

/// The rectangular grid of calendar cells for one month.
///
/// Weeks start on Sunday (weekday 0). The grid is the smallest multiple of
/// seven covering the month plus its leading weekday offset; leading cells
/// carry the trailing days of the previous month and trailing cells the
/// leading days of the next one, rolling year and month at the boundaries.
///
/// An out-of-range `month` yields an empty grid.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Vec<CalendarCell> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let days_in_month = match days_in_month(year, month) {
        Some(d) => i64::from(d),
        None => return Vec::new(),
    };

    let leading = i64::from(first.weekday().num_days_from_sunday());
    let cell_count = (days_in_month + leading + 6) / 7 * 7;
    let grid_start = first - Duration::days(leading);

    (0..cell_count)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            CalendarCell {
                date,
                day_of_month: date.day(),
                in_focused_month: date.year() == year && date.month() == month,
                is_today: date == today,
            }
        })
        .collect()
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}
