//! Single-pass reconciliation over the weekly deals sheet.
//!
//! Rows flow through a fixed gauntlet: background-color pre-filter, date
//! parse, horizon filter, SKU fan-out with product-type exclusions, then
//! per-SKU feed matching. Every filter skips and continues; nothing in
//! here aborts the run.

use chrono::NaiveDate;

use dealrecon_core::{CrazyDealRecord, PromotionRecord, ReportRow};

use crate::activity::ActivityResolver;
use crate::dates::parse_date_window;
use crate::matcher::{match_sku, MatchInput};
use crate::schema::{OutputMode, SchemaVersion};
use crate::sku::{expand_skus, product_type_or_default};

/// One raw row of the source sheet. Cells are positional; only the
/// [`SheetSchema`](crate::SheetSchema) knows what each position means.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub cells: Vec<String>,
    /// First-cell background color (hex), when the caller fetched grid
    /// formatting for the color pre-filter.
    pub background_color: Option<String>,
}

impl SourceRow {
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            background_color: None,
        }
    }

    #[must_use]
    pub fn with_background(cells: Vec<String>, background_color: Option<String>) -> Self {
        Self {
            cells,
            background_color,
        }
    }

    fn cell(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).map(String::as_str)
    }
}

/// Per-run reconciliation settings, built once by the caller and passed in.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    pub schema: SchemaVersion,
    pub output_mode: OutputMode,
    /// Forward-looking horizon in days; rows ending further out are not
    /// yet actionable and are skipped. Closed windows are skipped too —
    /// there is no lookback.
    pub horizon_days: i64,
    /// Rows whose first-cell background equals this color are dropped
    /// before SKU fan-out.
    pub excluded_background_color: Option<String>,
}

/// Result of one reconciliation pass.
#[derive(Debug)]
pub struct ReconcileSummary {
    /// Source rows inspected, including every skipped one.
    pub rows_read: usize,
    /// Reconciled rows, already narrowed by the configured output mode.
    pub rows: Vec<ReportRow>,
}

/// Reconciles the source rows against both feeds and the activity table.
///
/// `today` is injected rather than read from the clock so the horizon
/// filter is deterministic under test.
#[must_use]
pub fn reconcile(
    source_rows: &[SourceRow],
    promotions: &[PromotionRecord],
    crazy_deals: &[CrazyDealRecord],
    activity: &ActivityResolver,
    config: &ReconcileConfig,
    today: NaiveDate,
) -> ReconcileSummary {
    let schema = config.schema.columns();
    let mut out = Vec::new();

    for row in source_rows {
        if let Some(excluded) = &config.excluded_background_color {
            if row.background_color.as_deref() == Some(excluded.as_str()) {
                tracing::debug!(color = %excluded, "skipping row by background color");
                continue;
            }
        }

        let Some(date_text) = row.cell(schema.date) else {
            continue;
        };
        let Some(window) = parse_date_window(date_text) else {
            continue;
        };

        let diff_days = (window.end - today).num_days();
        if diff_days < 0 || diff_days > config.horizon_days {
            tracing::debug!(end = %window.end, diff_days, "row outside horizon");
            continue;
        }

        let product_type = product_type_or_default(row.cell(schema.product_type));
        let skus = expand_skus(row.cell(schema.skus), &product_type);
        if skus.is_empty() {
            continue;
        }

        // Both status cells reading "N/A" marks a promotion running at
        // regular price; those rows carry nothing to reconcile.
        if let Some(secondary) = schema.secondary_status {
            let price_na = row.cell(schema.price_copy).map(str::trim) == Some("N/A");
            let secondary_na = row.cell(secondary).map(str::trim) == Some("N/A");
            if price_na && secondary_na {
                continue;
            }
        }

        let days = date_text.split_whitespace().next().unwrap_or(date_text);
        let product_name = row.cell(schema.product_name).unwrap_or("");
        let price_copy = row.cell(schema.price_copy).unwrap_or("");
        let route_to_events = row.cell(schema.routing_status).map(str::trim) == Some("N/A");

        for sku in &skus {
            let input = MatchInput {
                sku,
                days,
                window,
                product_name,
                product_type: &product_type,
                active: activity.resolve(sku),
                price_copy,
                route_to_events,
            };
            out.push(match_sku(&input, promotions, crazy_deals));
        }
    }

    let rows = match config.output_mode {
        OutputMode::All => out,
        OutputMode::IssuesOnly => out.into_iter().filter(|row| row.issue).collect(),
    };

    ReconcileSummary {
        rows_read: source_rows.len(),
        rows,
    }
}
