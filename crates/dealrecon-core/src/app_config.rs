/// Application configuration, built once per run from the environment and
/// passed into every collaborator. Nothing reads env vars after startup.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,

    pub sheets_base_url: String,
    pub sheets_token: String,
    pub source_spreadsheet_id: String,
    pub source_sheet_name: String,
    pub dest_spreadsheet_id: String,
    pub dest_sheet_name: String,
    pub activity_spreadsheet_id: String,
    pub activity_sheet_name: String,

    pub warehouse_base_url: String,
    pub warehouse_token: String,
    /// Dataset qualifier spliced into the embedded view queries,
    /// e.g. `"analytics-prod.core"`.
    pub warehouse_dataset: String,
    pub warehouse_max_attempts: u32,
    pub warehouse_retry_delay_secs: u64,

    pub request_timeout_secs: u64,
    pub user_agent: String,

    /// First-cell background color (hex) marking rows to drop before
    /// SKU fan-out, e.g. `"#b7e1cd"`. Unset disables the pre-filter.
    pub excluded_row_color: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("sheets_base_url", &self.sheets_base_url)
            .field("sheets_token", &"[redacted]")
            .field("source_spreadsheet_id", &self.source_spreadsheet_id)
            .field("source_sheet_name", &self.source_sheet_name)
            .field("dest_spreadsheet_id", &self.dest_spreadsheet_id)
            .field("dest_sheet_name", &self.dest_sheet_name)
            .field("activity_spreadsheet_id", &self.activity_spreadsheet_id)
            .field("activity_sheet_name", &self.activity_sheet_name)
            .field("warehouse_base_url", &self.warehouse_base_url)
            .field("warehouse_token", &"[redacted]")
            .field("warehouse_dataset", &self.warehouse_dataset)
            .field("warehouse_max_attempts", &self.warehouse_max_attempts)
            .field(
                "warehouse_retry_delay_secs",
                &self.warehouse_retry_delay_secs,
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("excluded_row_color", &self.excluded_row_color)
            .finish()
    }
}
