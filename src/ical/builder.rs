//! A module to build iCal documents

use chrono::{DateTime, NaiveDate, Utc};
use ics::components::Property;
use ics::properties::{Categories, Description, Status, Summary};
use ics::{escape_text, Event, ICalendar};

use crate::settings::PRODUCT_NAME;
use crate::task::Task;

/// Build an interchange document from a task collection.
///
/// One `VEVENT` per task, in input order, between the usual header and
/// footer. The writer terminates every content line with CRLF and folds long
/// lines, per RFC 5545. No sorting, no deduplication.
///
/// `now` is injected by the caller so that a single export sees a single
/// consistent timestamp.
pub fn build_document(tasks: &[Task], now: &DateTime<Utc>) -> String {
    let s_now = format_date_time(now);

    let mut calendar = ICalendar::new("2.0", super::default_prod_id());
    for task in tasks {
        let mut event = Event::new(event_uid(task), s_now.clone());

        // Raw property, parameter included in the name
        event.push(Property::new(
            "DTSTART;VALUE=DATE",
            format_pure_date(task.date()),
        ));

        event.push(Summary::new(escape_text(task.text().to_string())));
        event.push(Description::new(escape_text(description_blob(task))));
        event.push(Categories::new(task.category().to_string()));

        // STATUS must come after DESCRIPTION: on re-import, the status line
        // overrides the completion flag packed in the description.
        let status = if task.completed() {
            Status::completed()
        } else {
            Status::confirmed()
        };
        event.push(status);

        calendar.add_event(event);
    }

    calendar.to_string()
}

/// Stable event identifier: exporting the same task twice yields the same UID.
fn event_uid(task: &Task) -> String {
    format!("{}@{}", task.id(), PRODUCT_NAME.to_lowercase())
}

/// `category`, comma-joined `tags` and the completion flag, packed into one
/// newline-separated blob (escaped by the caller).
fn description_blob(task: &Task) -> String {
    format!(
        "Category: {}\nTags: {}\nCompleted: {}",
        task.category(),
        task.tags().join(", "),
        if task.completed() { "Yes" } else { "No" },
    )
}

fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Render a task date as a pure `YYYYMMDD` value.
///
/// The date is anchored to midday before the components are extracted, so a
/// naive-to-local conversion anywhere downstream cannot nudge the timestamp
/// across midnight and shift the calendar day.
fn format_pure_date(date: NaiveDate) -> String {
    match date.and_hms_opt(12, 0, 0) {
        Some(anchored) => anchored.format("%Y%m%d").to_string(),
        None => date.format("%Y%m%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ORG_NAME;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_document_from_task() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap();
        let task = Task::with_details(
            "Water the plants",
            date(2024, 1, 15),
            String::from("home"),
            vec![String::from("garden"), String::from("weekly")],
            true,
            false,
        );

        let expected = format!(
            "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            PRODID:-//{}//{}//EN\r\n\
            BEGIN:VEVENT\r\n\
            UID:{}@daybook\r\n\
            DTSTAMP:20240116T083000Z\r\n\
            DTSTART;VALUE=DATE:20240115\r\n\
            SUMMARY:Water the plants\r\n\
            DESCRIPTION:Category: home\\nTags: garden\\, weekly\\nCompleted: Yes\r\n\
            CATEGORIES:home\r\n\
            STATUS:COMPLETED\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n",
            ORG_NAME,
            PRODUCT_NAME,
            task.id()
        );

        assert_eq!(build_document(&[task], &now), expected);
    }

    #[test]
    fn test_events_keep_input_order() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap();
        let first = Task::new("first", date(2024, 3, 1));
        let second = Task::new("second", date(2024, 1, 1));

        let document = build_document(&[first, second], &now);
        let pos_first = document.find("SUMMARY:first").unwrap();
        let pos_second = document.find("SUMMARY:second").unwrap();
        assert!(pos_first < pos_second);
    }

    #[test]
    fn test_uid_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap();
        let task = Task::new("a", date(2024, 1, 15));
        let uid_line = format!("UID:{}@daybook", task.id());

        assert!(build_document(&[task.clone()], &now).contains(&uid_line));
        assert!(build_document(&[task], &now).contains(&uid_line));
    }

    #[test]
    fn test_date_component_is_noon_anchored() {
        // Pure-date rendering must never drift to an adjacent day,
        // whatever the host offset is.
        assert_eq!(format_pure_date(date(2024, 1, 15)), "20240115");
        assert_eq!(format_pure_date(date(2024, 12, 31)), "20241231");
    }

    #[test]
    fn test_incomplete_task_is_confirmed() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap();
        let task = Task::new("a", date(2024, 1, 15));
        let document = build_document(&[task], &now);
        assert!(document.contains("STATUS:CONFIRMED\r\n"));
    }
}
