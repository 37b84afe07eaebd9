//! Domain records shared across the workspace.
//!
//! The warehouse crate deserializes feed rows into these types and the
//! engine consumes them read-only; nothing here is mutated after fetch.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Sentinel written into report cells when a backend value is absent.
pub const MISSING: &str = "missing";

/// A date value as the warehouse actually sends it.
///
/// ## Observed encodings
///
/// - A plain ISO date string, e.g. `"2025-02-01"` — passed through.
/// - A wrapped object `{"value": "2025-02-01"}` (the warehouse's civil-date
///   type) — unwrapped.
/// - An RFC 3339 timestamp, e.g. `"2025-02-01T00:00:00Z"` — only the date
///   portion is kept.
///
/// [`normalize_backend_date`] collapses all three to a single ISO string,
/// identically for both feeds, before any comparison or output.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BackendDate {
    Wrapped { value: String },
    Plain(String),
}

/// Normalizes an optional backend date to an ISO date string, or the
/// [`MISSING`] sentinel when the value is absent.
#[must_use]
pub fn normalize_backend_date(value: Option<&BackendDate>) -> String {
    match value {
        None => MISSING.to_string(),
        Some(BackendDate::Wrapped { value }) => value.clone(),
        Some(BackendDate::Plain(raw)) => match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.date_naive().format("%Y-%m-%d").to_string(),
            Err(_) => raw.clone(),
        },
    }
}

/// Parses an optional backend date into a [`NaiveDate`] for window
/// comparisons. Absent or non-ISO values yield `None`, which never matches.
#[must_use]
pub fn backend_date_as_naive(value: Option<&BackendDate>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_backend_date(value), "%Y-%m-%d").ok()
}

/// A backend-confirmed promotional event window for one SKU, from the
/// events feed.
#[derive(Debug, Clone)]
pub struct PromotionRecord {
    pub item_id: i64,
    pub promotion_id: String,
    /// Promotion type as labelled by the warehouse, e.g. `"Insider Exclusive"`.
    pub kind: String,
    pub sale_price: Decimal,
    pub start_date: Option<BackendDate>,
    pub end_date: Option<BackendDate>,
    pub sales_channel: Option<String>,
}

/// A "buy X get Y%" promotion from the crazy-deals feed. `item_id` is a
/// string here — the feed does not cast it, unlike the events view.
#[derive(Debug, Clone)]
pub struct CrazyDealRecord {
    pub item_id: String,
    pub start_date: Option<BackendDate>,
    pub end_date: Option<BackendDate>,
    pub mmid: String,
    pub minimum_purchase: Decimal,
    pub crazy_deal_percent: Decimal,
    pub maximum_purchase: Option<Decimal>,
}

/// One row of the channel-activity reference sheet.
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    pub sku: String,
    /// Stringified activity flag, written to the report as-is.
    pub is_active: String,
}
