use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let sheets_token = require("DEALRECON_SHEETS_TOKEN")?;
    let source_spreadsheet_id = require("DEALRECON_SOURCE_SPREADSHEET_ID")?;
    let dest_spreadsheet_id = require("DEALRECON_DEST_SPREADSHEET_ID")?;
    let activity_spreadsheet_id = require("DEALRECON_ACTIVITY_SPREADSHEET_ID")?;
    let warehouse_base_url = require("DEALRECON_WAREHOUSE_BASE_URL")?;
    let warehouse_token = require("DEALRECON_WAREHOUSE_TOKEN")?;

    let log_level = or_default("DEALRECON_LOG_LEVEL", "info");
    let sheets_base_url = or_default(
        "DEALRECON_SHEETS_BASE_URL",
        "https://sheets.googleapis.com/v4",
    );
    let source_sheet_name = or_default("DEALRECON_SOURCE_SHEET_NAME", "New Weekly Deals");
    let dest_sheet_name = or_default("DEALRECON_DEST_SHEET_NAME", "EmailSheet");
    let activity_sheet_name = or_default("DEALRECON_ACTIVITY_SHEET_NAME", "Channel Activity");
    let warehouse_dataset = or_default("DEALRECON_WAREHOUSE_DATASET", "core");

    let warehouse_max_attempts = parse_u32("DEALRECON_WAREHOUSE_MAX_ATTEMPTS", "5")?;
    let warehouse_retry_delay_secs = parse_u64("DEALRECON_WAREHOUSE_RETRY_DELAY_SECS", "2")?;
    let request_timeout_secs = parse_u64("DEALRECON_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DEALRECON_USER_AGENT", "dealrecon/0.1 (deal-reconciliation)");
    let excluded_row_color = lookup("DEALRECON_EXCLUDED_ROW_COLOR").ok();

    Ok(AppConfig {
        log_level,
        sheets_base_url,
        sheets_token,
        source_spreadsheet_id,
        source_sheet_name,
        dest_spreadsheet_id,
        dest_sheet_name,
        activity_spreadsheet_id,
        activity_sheet_name,
        warehouse_base_url,
        warehouse_token,
        warehouse_dataset,
        warehouse_max_attempts,
        warehouse_retry_delay_secs,
        request_timeout_secs,
        user_agent,
        excluded_row_color,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("DEALRECON_SHEETS_TOKEN", "sheets-token");
        m.insert("DEALRECON_SOURCE_SPREADSHEET_ID", "src-sheet-id");
        m.insert("DEALRECON_DEST_SPREADSHEET_ID", "dest-sheet-id");
        m.insert("DEALRECON_ACTIVITY_SPREADSHEET_ID", "activity-sheet-id");
        m.insert("DEALRECON_WAREHOUSE_BASE_URL", "https://warehouse.test");
        m.insert("DEALRECON_WAREHOUSE_TOKEN", "warehouse-token");
        m
    }

    #[test]
    fn build_app_config_fails_without_sheets_token() {
        let mut map = full_env();
        map.remove("DEALRECON_SHEETS_TOKEN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DEALRECON_SHEETS_TOKEN"),
            "expected MissingEnvVar(DEALRECON_SHEETS_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_warehouse_base_url() {
        let mut map = full_env();
        map.remove("DEALRECON_WAREHOUSE_BASE_URL");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DEALRECON_WAREHOUSE_BASE_URL"),
            "expected MissingEnvVar(DEALRECON_WAREHOUSE_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.sheets_base_url, "https://sheets.googleapis.com/v4");
        assert_eq!(cfg.source_sheet_name, "New Weekly Deals");
        assert_eq!(cfg.dest_sheet_name, "EmailSheet");
        assert_eq!(cfg.activity_sheet_name, "Channel Activity");
        assert_eq!(cfg.warehouse_dataset, "core");
        assert_eq!(cfg.warehouse_max_attempts, 5);
        assert_eq!(cfg.warehouse_retry_delay_secs, 2);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "dealrecon/0.1 (deal-reconciliation)");
        assert!(cfg.excluded_row_color.is_none());
    }

    #[test]
    fn build_app_config_retry_overrides() {
        let mut map = full_env();
        map.insert("DEALRECON_WAREHOUSE_MAX_ATTEMPTS", "3");
        map.insert("DEALRECON_WAREHOUSE_RETRY_DELAY_SECS", "1");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.warehouse_max_attempts, 3);
        assert_eq!(cfg.warehouse_retry_delay_secs, 1);
    }

    #[test]
    fn build_app_config_invalid_max_attempts() {
        let mut map = full_env();
        map.insert("DEALRECON_WAREHOUSE_MAX_ATTEMPTS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALRECON_WAREHOUSE_MAX_ATTEMPTS"),
            "expected InvalidEnvVar(DEALRECON_WAREHOUSE_MAX_ATTEMPTS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_excluded_row_color_set() {
        let mut map = full_env();
        map.insert("DEALRECON_EXCLUDED_ROW_COLOR", "#b7e1cd");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.excluded_row_color.as_deref(), Some("#b7e1cd"));
    }

    #[test]
    fn debug_redacts_tokens() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sheets-token"));
        assert!(!rendered.contains("warehouse-token"));
        assert!(rendered.contains("[redacted]"));
    }
}
