//! Per-SKU channel-activity lookup.

use std::collections::HashMap;

use dealrecon_core::ActivityRecord;

/// Sentinel for SKUs absent from the channel-activity reference sheet —
/// the product is not sold through the web channel.
pub const NOT_WEB: &str = "not-Web";

/// Channel-activity lookup keyed by SKU.
///
/// The reference table is small enough to scan, but a map keeps the
/// per-SKU lookup constant-time across the fan-out. Duplicate SKU rows in
/// the reference sheet: the first row wins.
#[derive(Debug, Default)]
pub struct ActivityResolver {
    by_sku: HashMap<String, String>,
}

impl ActivityResolver {
    #[must_use]
    pub fn from_records(records: Vec<ActivityRecord>) -> Self {
        let mut by_sku = HashMap::with_capacity(records.len());
        for record in records {
            by_sku.entry(record.sku).or_insert(record.is_active);
        }
        Self { by_sku }
    }

    /// Returns the SKU's activity flag, or [`NOT_WEB`] when the SKU is not
    /// in the reference table. Lookup is exact string equality.
    #[must_use]
    pub fn resolve(&self, sku: &str) -> &str {
        self.by_sku.get(sku).map_or(NOT_WEB, String::as_str)
    }
}
