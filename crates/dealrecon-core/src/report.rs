//! The fixed 15-column report schema.

/// Destination header row, in write order. [`ReportRow::to_cells`] must stay
/// aligned with this.
pub const REPORT_HEADER: [&str; 15] = [
    "Days",
    "Beg_DT",
    "End_DT",
    "SKU(s)",
    "PRODUCT / COLLECTION NAME",
    "Active",
    "PRODUCT TYPE",
    "start_date",
    "end_date",
    "MMID",
    "Buy",
    "Get",
    "promotion_id",
    "sale_price",
    "issue",
];

/// One reconciled output row, produced fresh per (source row, SKU) pair and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// First whitespace token of the raw date text, e.g. `"2/1/25"`.
    pub days: String,
    pub beg_dt: String,
    pub end_dt: String,
    pub sku: String,
    pub product_name: String,
    pub active: String,
    pub product_type: String,
    pub start_date: String,
    pub end_date: String,
    pub mmid: String,
    pub buy: String,
    pub get: String,
    pub promotion_id: String,
    pub sale_price: String,
    /// `true` when no backend record reconciled this SKU/window and the row
    /// needs human review; rendered as `Y`/`N`.
    pub issue: bool,
}

impl ReportRow {
    /// Renders the row as sheet cells, in [`REPORT_HEADER`] order.
    #[must_use]
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.days.clone(),
            self.beg_dt.clone(),
            self.end_dt.clone(),
            self.sku.clone(),
            self.product_name.clone(),
            self.active.clone(),
            self.product_type.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.mmid.clone(),
            self.buy.clone(),
            self.get.clone(),
            self.promotion_id.clone(),
            self.sale_price.clone(),
            if self.issue { "Y" } else { "N" }.to_owned(),
        ]
    }
}
