//! This module handles conversion between iCal documents and task records
//!
//! Building goes through the `ics` crate; parsing is a hand-rolled lenient
//! scanner, since imports must tolerate documents no strict parser would accept.

mod builder;
pub use builder::build_document;
mod parser;
pub use parser::parse_document;

use chrono::NaiveDate;

use crate::settings::{ORG_NAME, PRODUCT_NAME};

pub fn default_prod_id() -> String {
    format!("-//{}//{}//EN", ORG_NAME, PRODUCT_NAME)
}

/// File name for an exported document: `<product>-export-<YYYY-MM-DD>.ics`
pub fn export_filename(today: NaiveDate) -> String {
    sanitize_filename::sanitize(format!(
        "{}-export-{}.ics",
        PRODUCT_NAME.to_lowercase(),
        today.format("%Y-%m-%d")
    ))
}

/// Reverse RFC 5545 TEXT escaping as produced by [`ics::escape_text`]:
/// `\n` becomes a newline, any other escaped character stands for itself.
/// A trailing lone backslash is kept as-is.
pub(crate) fn unescape_text(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text("a\\,b\\;c\\\\d\\ne"), "a,b;c\\d\ne");
        assert_eq!(unescape_text("plain"), "plain");
    }

    #[test]
    fn test_unescape_reverses_writer_escaping() {
        // The builder escapes with the ics helper; our unescape must be its inverse
        let raw = "a,b;c\\d\ne";
        let escaped = ics::escape_text(raw.to_string());
        assert_eq!(unescape_text(&escaped), raw);
    }

    #[test]
    fn test_unescape_tolerates_trailing_backslash() {
        assert_eq!(unescape_text("abc\\"), "abc\\");
    }

    #[test]
    fn test_export_filename() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert_eq!(export_filename(today), "daybook-export-2024-01-16.ics");
    }
}
