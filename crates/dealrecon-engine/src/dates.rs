//! Date-window extraction from free-text date cells.
//!
//! Deal rows carry dates as copy-edited text like `"2/1/25"` or
//! `"1/5/24 - 1/10/24 (Insider preview)"`. The window is the first one or
//! two `M/D/YY` tokens found anywhere in the text; everything else in the
//! cell is ignored.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// One or two `M/D/YY` tokens, optionally separated by a hyphen. Unanchored:
/// surrounding prose is allowed.
static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{2})\b(?:\s*-\s*(\d{1,2}/\d{1,2}/\d{2}))?")
        .expect("date token pattern is valid")
});

/// A deal's promotional window. Invariant: `begin <= end`; a single date
/// token yields `begin == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    #[must_use]
    pub fn begin_iso(&self) -> String {
        self.begin.format("%Y-%m-%d").to_string()
    }

    #[must_use]
    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Extracts a [`DateWindow`] from free text.
///
/// Returns `None` when no date token matches, when a token is not a real
/// calendar date, or when the two tokens are reversed (`end < begin`).
/// Callers skip the row on `None` rather than raising.
#[must_use]
pub fn parse_date_window(text: &str) -> Option<DateWindow> {
    let caps = DATE_TOKEN.captures(text)?;
    let begin = parse_token(caps.get(1)?.as_str())?;
    let end = match caps.get(2) {
        Some(m) => parse_token(m.as_str())?,
        None => begin,
    };
    (begin <= end).then_some(DateWindow { begin, end })
}

/// Parses one `M/D/YY` token, expanding the two-digit year with a `20` prefix.
fn parse_token(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
