//! Wire shapes for the sheets REST API.
//!
//! Only the fields this client reads are modelled; everything else in the
//! service's responses is ignored by serde.

use serde::Deserialize;

/// Response body of `GET .../values/{range}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    /// Cell values. The service sends strings for formatted cells but raw
    /// numbers and booleans are possible; [`cell_to_string`] flattens them.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Spreadsheet metadata, fetched with a `sheets.properties` field mask.
#[derive(Debug, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
}

/// Spreadsheet grid data, fetched with a background-color field mask.
#[derive(Debug, Deserialize)]
pub struct GridSpreadsheet {
    #[serde(default)]
    pub sheets: Vec<GridSheet>,
}

#[derive(Debug, Deserialize)]
pub struct GridSheet {
    #[serde(default)]
    pub data: Vec<GridData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default)]
    pub row_data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
pub struct RowData {
    #[serde(default)]
    pub values: Vec<CellData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default)]
    pub effective_format: Option<CellFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(default)]
    pub background_color: Option<RgbColor>,
}

/// A color as the grid API sends it: float channels in `0.0..=1.0`, with
/// zero channels omitted entirely.
#[derive(Debug, Deserialize)]
pub struct RgbColor {
    #[serde(default)]
    pub red: f32,
    #[serde(default)]
    pub green: f32,
    #[serde(default)]
    pub blue: f32,
}

impl RgbColor {
    /// Renders the color as a lowercase `#rrggbb` hex string, the form the
    /// exclusion config uses.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Flattens one cell value to the string the engine works with.
#[must_use]
pub fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_hex_renders_known_color() {
        let color: RgbColor =
            serde_json::from_str(r#"{"red": 0.7176471, "green": 0.88235295, "blue": 0.8039216}"#)
                .unwrap();
        assert_eq!(color.to_hex(), "#b7e1cd");
    }

    #[test]
    fn to_hex_defaults_missing_channels_to_zero() {
        let color: RgbColor = serde_json::from_str(r#"{"red": 1.0}"#).unwrap();
        assert_eq!(color.to_hex(), "#ff0000");
    }

    #[test]
    fn cell_to_string_flattens_numbers_and_nulls() {
        assert_eq!(cell_to_string(&serde_json::json!("100")), "100");
        assert_eq!(cell_to_string(&serde_json::json!(100)), "100");
        assert_eq!(cell_to_string(&serde_json::json!(null)), "");
        assert_eq!(cell_to_string(&serde_json::json!(true)), "true");
    }
}
