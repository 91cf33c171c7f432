//! The daily rollover procedure
//!
//! Overdue unfinished tasks are pulled forward to the current day, at most
//! once per calendar day. The gate marker is an explicit in/out parameter:
//! the caller loads it, passes it in, and persists whatever comes back.

use chrono::NaiveDate;

use crate::task::Task;

/// Outcome of one rollover invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rollover {
    /// How many tasks were re-dated
    pub moved: usize,
    /// The marker the caller must persist for the once-per-day gate
    pub marker: NaiveDate,
}

/// Move every task with `date < today && !completed` to `today`, in place.
///
/// Skipped entirely when `last_run` already equals `today`, which makes a
/// second invocation on the same day a no-op. The returned marker is `today`
/// even when nothing needed moving, so the gate stays once-per-day on no-op
/// days too. Task identity, count and all other fields are untouched; a
/// task's date only ever moves forward under this procedure.
pub fn roll_over(tasks: &mut [Task], last_run: Option<NaiveDate>, today: NaiveDate) -> Rollover {
    if last_run == Some(today) {
        return Rollover { moved: 0, marker: today };
    }

    let mut moved = 0;
    for task in tasks.iter_mut() {
        if !task.completed() && task.date() < today {
            task.set_date(today);
            moved += 1;
        }
    }

    log::info!("Rollover moved {} task(s) to {}", moved, today);
    Rollover { moved, marker: today }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overdue_unfinished_task_moves_to_today() {
        let today = date(2024, 1, 16);
        let mut tasks = vec![Task::new("overdue", date(2024, 1, 14))];

        let outcome = roll_over(&mut tasks, None, today);
        assert_eq!(outcome.moved, 1);
        assert_eq!(outcome.marker, today);
        assert_eq!(tasks[0].date(), today);
    }

    #[test]
    fn test_completed_task_is_left_behind() {
        let today = date(2024, 1, 16);
        let mut done = Task::new("done", date(2024, 1, 14));
        done.set_completed(true);
        let mut tasks = vec![done];

        let outcome = roll_over(&mut tasks, None, today);
        assert_eq!(outcome.moved, 0);
        assert_eq!(tasks[0].date(), date(2024, 1, 14));
    }

    #[test]
    fn test_task_dated_today_or_later_is_untouched() {
        let today = date(2024, 1, 16);
        let mut tasks = vec![
            Task::new("today", today),
            Task::new("future", date(2024, 1, 20)),
        ];

        let outcome = roll_over(&mut tasks, None, today);
        assert_eq!(outcome.moved, 0);
        assert_eq!(tasks[0].date(), today);
        assert_eq!(tasks[1].date(), date(2024, 1, 20));
    }

    #[test]
    fn test_gate_skips_second_run_same_day() {
        let today = date(2024, 1, 16);
        let mut tasks = vec![Task::new("overdue", date(2024, 1, 14))];

        let first = roll_over(&mut tasks, None, today);
        assert_eq!(first.moved, 1);

        // Re-date the task backwards by hand: the gate must prevent a
        // same-day second pass from touching it.
        tasks[0].set_date(date(2024, 1, 14));
        let second = roll_over(&mut tasks, Some(first.marker), today);
        assert_eq!(second.moved, 0);
        assert_eq!(second.marker, today);
        assert_eq!(tasks[0].date(), date(2024, 1, 14));
    }

    #[test]
    fn test_marker_written_on_noop_day() {
        let today = date(2024, 1, 16);
        let mut tasks: Vec<Task> = Vec::new();

        let outcome = roll_over(&mut tasks, Some(date(2024, 1, 15)), today);
        assert_eq!(outcome.moved, 0);
        assert_eq!(outcome.marker, today);
    }

    #[test]
    fn test_identity_and_fields_preserved() {
        let today = date(2024, 1, 16);
        let mut task = Task::new("overdue", date(2024, 1, 10));
        task.set_tags(vec![String::from("errand")]);
        task.set_pinned(true);
        let id = task.id().to_string();
        let mut tasks = vec![task];

        roll_over(&mut tasks, None, today);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id(), id);
        assert_eq!(tasks[0].tags(), ["errand"]);
        assert!(tasks[0].pinned());
    }
}
