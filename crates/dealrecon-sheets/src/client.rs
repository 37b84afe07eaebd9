//! HTTP client for the sheets REST API.
//!
//! Reads are value-range fetches; the destination write recreates the
//! report in place (ensure the sheet exists, clear it, write header plus
//! rows in one update). Nothing here retries: a sheet failure aborts the
//! run before any partial write.

use std::time::Duration;

use reqwest::Client;

use crate::error::SheetsError;
use crate::types::{cell_to_string, GridSpreadsheet, RgbColor, SpreadsheetMeta, ValueRange};

/// Client for a sheets-style REST API.
///
/// Use [`SheetsClient::new`] with the configured base URL; tests point it
/// at a wiremock server.
pub struct SheetsClient {
    client: Client,
    token: String,
    base_url: String,
}

impl SheetsClient {
    /// Creates a client for the sheets service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            token: token.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches the data rows of a sheet, header row dropped, every cell
    /// flattened to a string. Row order is the sheet's own.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    pub async fn fetch_rows(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            spreadsheet_id,
            a1_sheet(sheet_name)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;
        let body = Self::read_success_body(response, &url).await?;

        let range: ValueRange =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: url.clone(),
                source: e,
            })?;

        let mut rows: Vec<Vec<String>> = range
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        if !rows.is_empty() {
            rows.remove(0);
        }
        Ok(rows)
    }

    /// Fetches the first-column background color of every data row as a
    /// `#rrggbb` hex string, aligned with [`SheetsClient::fetch_rows`]
    /// (header entry dropped). Cells without an effective format yield
    /// `None`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SheetsClient::fetch_rows`].
    pub async fn fetch_first_column_backgrounds(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<Vec<Option<String>>, SheetsError> {
        let url = format!("{}/spreadsheets/{}", self.base_url, spreadsheet_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("ranges", format!("{}!A:A", a1_sheet(sheet_name)).as_str()),
                (
                    "fields",
                    "sheets.data.rowData.values.effectiveFormat.backgroundColor",
                ),
            ])
            .send()
            .await?;
        let body = Self::read_success_body(response, &url).await?;

        let grid: GridSpreadsheet =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: url.clone(),
                source: e,
            })?;

        let mut colors: Vec<Option<String>> = grid
            .sheets
            .first()
            .and_then(|sheet| sheet.data.first())
            .map(|data| {
                data.row_data
                    .iter()
                    .map(|row| {
                        row.values
                            .first()
                            .and_then(|cell| cell.effective_format.as_ref())
                            .and_then(|format| format.background_color.as_ref())
                            .map(RgbColor::to_hex)
                    })
                    .collect()
            })
            .unwrap_or_default();
        if !colors.is_empty() {
            colors.remove(0);
        }
        Ok(colors)
    }

    /// Recreates the destination report: ensures the sheet exists, clears
    /// it, and writes the header followed by `rows` in one update.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SheetsClient::fetch_rows`]; the write is not
    /// attempted once any earlier step fails.
    pub async fn write_report(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), SheetsError> {
        self.ensure_sheet(spreadsheet_id, sheet_name).await?;

        let clear_url = format!(
            "{}/spreadsheets/{}/values/{}:clear",
            self.base_url,
            spreadsheet_id,
            a1_sheet(sheet_name)
        );
        let response = self
            .client
            .post(&clear_url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::read_success_body(response, &clear_url).await?;

        let mut values: Vec<Vec<String>> =
            vec![header.iter().map(|h| (*h).to_owned()).collect()];
        values.extend(rows.iter().cloned());

        let update_url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            spreadsheet_id,
            a1_sheet(sheet_name)
        );
        let response = self
            .client
            .put(&update_url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&serde_json::json!({
                "range": a1_sheet(sheet_name),
                "majorDimension": "ROWS",
                "values": values,
            }))
            .send()
            .await?;
        Self::read_success_body(response, &update_url).await?;

        tracing::info!(
            sheet = %sheet_name,
            rows = rows.len(),
            "report written"
        );
        Ok(())
    }

    /// Adds the destination sheet when the spreadsheet does not have it yet.
    async fn ensure_sheet(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<(), SheetsError> {
        let url = format!("{}/spreadsheets/{}", self.base_url, spreadsheet_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("fields", "sheets.properties")])
            .send()
            .await?;
        let body = Self::read_success_body(response, &url).await?;

        let meta: SpreadsheetMeta =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: url.clone(),
                source: e,
            })?;
        if meta
            .sheets
            .iter()
            .any(|sheet| sheet.properties.title == sheet_name)
        {
            return Ok(());
        }

        tracing::info!(sheet = %sheet_name, "destination sheet absent, creating it");
        let batch_url = format!("{}/spreadsheets/{}:batchUpdate", self.base_url, spreadsheet_id);
        let response = self
            .client
            .post(&batch_url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "requests": [
                    { "addSheet": { "properties": { "title": sheet_name } } }
                ]
            }))
            .send()
            .await?;
        Self::read_success_body(response, &batch_url).await?;
        Ok(())
    }

    /// Asserts a 2xx status and returns the response body.
    async fn read_success_body(
        response: reqwest::Response,
        url: &str,
    ) -> Result<String, SheetsError> {
        let status = response.status();
        if !status.is_success() {
            return Err(SheetsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Quotes a sheet name for A1 notation; names with spaces require it and
/// quoting is harmless otherwise.
fn a1_sheet(sheet_name: &str) -> String {
    format!("'{sheet_name}'")
}
