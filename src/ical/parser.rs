//! A module to parse iCal documents
//!
//! This is deliberately not a strict RFC 5545 parser: imported documents come
//! from arbitrary tools, so the scanner degrades per-field and per-event and
//! never errors. Incomplete event blocks are dropped, nothing is rejected
//! wholesale.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::unescape_text;
use crate::task::{Task, DEFAULT_CATEGORY};

static CATEGORY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Category: (.*)").unwrap());
static TAGS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Tags: (.*)").unwrap());
static COMPLETED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Completed: (Yes|No)").unwrap());

/// Scan an interchange document and return one task per complete event block.
///
/// Completeness means both a summary and a usable pure date were seen; every
/// other field falls back to its default. Imported tasks always get a freshly
/// minted id (a copy is a new task) and are never pinned.
pub fn parse_document(content: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut current: Option<EventBuilder> = None;

    for line in unfold_lines(content) {
        if line.starts_with("BEGIN:VEVENT") {
            current = Some(EventBuilder::new());
            continue;
        }
        if line.starts_with("END:VEVENT") {
            if let Some(builder) = current.take() {
                match builder.commit() {
                    Some(task) => tasks.push(task),
                    None => log::debug!("Dropping an incomplete event block"),
                }
            }
            continue;
        }
        if let Some(builder) = current.as_mut() {
            if let Some(pos) = line.find(':') {
                builder.apply(&line[..pos], &line[pos + 1..]);
            }
        }
    }

    tasks
}

/// Split on CRLF or LF and merge folded continuation lines (leading space or
/// tab) into their predecessor, since the builder's writer folds long lines.
fn unfold_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for raw in content.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let continuation = raw
            .strip_prefix(' ')
            .or_else(|| raw.strip_prefix('\t'));
        match (continuation, lines.last_mut()) {
            (Some(rest), Some(prev)) => prev.push_str(rest),
            _ => lines.push(raw.to_string()),
        }
    }

    lines
}

/// Accumulates the properties of one event block.
///
/// Fields start out at their defaults and each recognized property line
/// overwrites its field, so when a property appears twice the later line
/// wins. Only `text` and `date` are required to materialize a task.
#[derive(Debug)]
struct EventBuilder {
    text: Option<String>,
    date: Option<NaiveDate>,
    completed: bool,
    category: String,
    tags: Vec<String>,
    pinned: bool,
}

impl EventBuilder {
    fn new() -> Self {
        Self {
            text: None,
            date: None,
            completed: false,
            category: String::from(DEFAULT_CATEGORY),
            tags: Vec::new(),
            pinned: false,
        }
    }

    /// Property names are matched by prefix so that parameterized forms
    /// (`DTSTART;VALUE=DATE`) match too. This also accepts unrelated
    /// properties sharing a prefix; that leniency is kept on purpose.
    fn apply(&mut self, key: &str, value: &str) {
        if key.starts_with("SUMMARY") {
            // Kept raw: escaped punctuation is not restored on import,
            // an accepted lossy asymmetry with the builder.
            self.text = Some(value.to_string());
        } else if key.starts_with("DTSTART") {
            self.date = parse_pure_date(value);
        } else if key.starts_with("DESCRIPTION") {
            self.apply_description(value);
        } else if key.starts_with("STATUS") {
            // Authoritative over the Completed flag packed in DESCRIPTION
            self.completed = value == "COMPLETED";
        } else if key.starts_with("CATEGORIES") {
            self.category = value.to_string();
        }
    }

    /// Extract the `Category`, `Tags` and `Completed` sub-fields our builder
    /// packs into the description. Each overwrites its field only when found.
    fn apply_description(&mut self, value: &str) {
        let unescaped = unescape_text(value);

        if let Some(caps) = CATEGORY_RE.captures(&unescaped) {
            self.category = caps[1].trim().to_string();
        }
        if let Some(caps) = TAGS_RE.captures(&unescaped) {
            self.tags = caps[1]
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(caps) = COMPLETED_RE.captures(&unescaped) {
            self.completed = &caps[1] == "Yes";
        }
    }

    /// Materialize a task, or `None` when a required field never showed up.
    fn commit(self) -> Option<Task> {
        let text = self.text.filter(|t| !t.trim().is_empty())?;
        let date = self.date?;
        Some(Task::with_details(
            text,
            date,
            self.category,
            self.tags,
            self.completed,
            self.pinned,
        ))
    }
}

/// Accept only an 8-digit `YYYYMMDD`, with any time-of-day suffix stripped.
/// `20240115` and `20240115T093000Z` both yield 2024-01-15; anything else is rejected.
fn parse_pure_date(value: &str) -> Option<NaiveDate> {
    let day_part = value.split('T').next().unwrap_or(value);
    if day_part.len() != 8 || !day_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(day_part, "%Y%m%d").ok()
}
