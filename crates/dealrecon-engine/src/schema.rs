//! Named-field column maps for the known source-sheet revisions.
//!
//! The weekly deals sheet has been reshaped twice; the revisions shift
//! columns by one and change which cell drives feed routing. Column
//! positions live here and nowhere else — the pipeline only ever asks the
//! schema for a named field.

use std::str::FromStr;

/// A known revision of the weekly deals sheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Original layout: SKUs in column 3, product type in column 11, one
    /// status cell doing double duty as router and price copy.
    V1,
    /// Columns shifted down by one; introduced the row-color exclusion.
    V2,
    /// Current layout: routing moved to its own column, a secondary status
    /// column marks regular-price promotions.
    V3,
}

/// Zero-based column positions for one sheet revision.
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    pub date: usize,
    pub skus: usize,
    pub product_name: usize,
    /// The cell whose trimmed `"N/A"` value routes a SKU to the events feed.
    pub routing_status: usize,
    /// The cell carrying promotional price copy for the crazy-deals path.
    pub price_copy: usize,
    /// Secondary status cell; when present and both it and `price_copy`
    /// trim to `"N/A"`, the row is a regular-price promotion and is skipped.
    pub secondary_status: Option<usize>,
    pub product_type: usize,
}

impl SchemaVersion {
    #[must_use]
    pub fn columns(self) -> SheetSchema {
        match self {
            SchemaVersion::V1 => SheetSchema {
                date: 0,
                skus: 3,
                product_name: 4,
                routing_status: 7,
                price_copy: 7,
                secondary_status: None,
                product_type: 11,
            },
            SchemaVersion::V2 => SheetSchema {
                date: 0,
                skus: 2,
                product_name: 3,
                routing_status: 7,
                price_copy: 7,
                secondary_status: None,
                product_type: 10,
            },
            SchemaVersion::V3 => SheetSchema {
                date: 0,
                skus: 2,
                product_name: 3,
                routing_status: 6,
                price_copy: 7,
                secondary_status: Some(11),
                product_type: 10,
            },
        }
    }

    /// Output mode the revision shipped with: the current layout reports
    /// issues only, the earlier ones the full table.
    #[must_use]
    pub fn default_output_mode(self) -> OutputMode {
        match self {
            SchemaVersion::V1 | SchemaVersion::V2 => OutputMode::All,
            SchemaVersion::V3 => OutputMode::IssuesOnly,
        }
    }

    /// First-cell background color excluded by default under this revision.
    /// Only V2 shipped with the color exclusion turned on.
    #[must_use]
    pub fn default_excluded_color(self) -> Option<&'static str> {
        match self {
            SchemaVersion::V2 => Some("#b7e1cd"),
            SchemaVersion::V1 | SchemaVersion::V3 => None,
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Ok(SchemaVersion::V1),
            "v2" => Ok(SchemaVersion::V2),
            "v3" => Ok(SchemaVersion::V3),
            other => Err(format!("unknown schema version: {other}")),
        }
    }
}

/// Which rows reach the destination sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Every reconciled row, matched or not.
    All,
    /// Only rows flagged for human review.
    IssuesOnly,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(OutputMode::All),
            "issues-only" | "issues" => Ok(OutputMode::IssuesOnly),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}
