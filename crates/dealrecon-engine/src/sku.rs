//! SKU cell fan-out and product-type exclusions.

/// Product type written when the source cell is blank.
pub const DEFAULT_PRODUCT_TYPE: &str = "tbd";

/// Product types whose rows never reach reconciliation. Matched as
/// case-insensitive substrings of the product-type cell.
const EXCLUDED_TYPE_FRAGMENTS: [&str; 2] = ["email only", "image collection"];

/// Returns the trimmed product type, or [`DEFAULT_PRODUCT_TYPE`] when the
/// cell is blank or absent.
#[must_use]
pub fn product_type_or_default(cell: Option<&str>) -> String {
    match cell.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_owned(),
        _ => DEFAULT_PRODUCT_TYPE.to_owned(),
    }
}

/// Splits a SKU cell into candidate SKUs.
///
/// Tokens are separated by commas or runs of whitespace (the schema
/// revisions disagreed on the delimiter; the union is accepted), trimmed,
/// and dropped when empty. Returns an empty vec — the caller skips the
/// whole row — when the cell is absent, yields no tokens, or the product
/// type is excluded.
#[must_use]
pub fn expand_skus(cell: Option<&str>, product_type: &str) -> Vec<String> {
    let lowered = product_type.to_lowercase();
    if EXCLUDED_TYPE_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
    {
        return Vec::new();
    }

    let Some(cell) = cell else {
        return Vec::new();
    };

    cell.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
