//! Report run orchestration: fetch everything, reconcile once, write once.

use anyhow::Context;

use dealrecon_core::{ActivityRecord, AppConfig, ReportRow, REPORT_HEADER};
use dealrecon_engine::{
    reconcile, ActivityResolver, OutputMode, ReconcileConfig, SchemaVersion, SourceRow,
};
use dealrecon_sheets::SheetsClient;
use dealrecon_warehouse::WarehouseClient;

/// Fallback horizon when the runtime parameter is absent or non-positive.
const DEFAULT_DAYS_OUT: i64 = 10;

/// Runs one full reconciliation pass.
///
/// Feed fetches degrade to empty sets internally; any sheet failure is
/// fatal and propagates before the destination is touched.
pub async fn run(
    config: &AppConfig,
    days_out: i64,
    schema: SchemaVersion,
    output: Option<OutputMode>,
) -> anyhow::Result<()> {
    let horizon_days = if days_out > 0 {
        days_out
    } else {
        tracing::warn!(days_out, "non-positive horizon, using default");
        DEFAULT_DAYS_OUT
    };

    let warehouse = WarehouseClient::new(
        &config.warehouse_base_url,
        &config.warehouse_token,
        config.request_timeout_secs,
        &config.user_agent,
        config.warehouse_max_attempts,
        config.warehouse_retry_delay_secs,
    )
    .context("building warehouse client")?;
    let sheets = SheetsClient::new(
        &config.sheets_base_url,
        &config.sheets_token,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("building sheets client")?;

    let crazy_deals = warehouse.fetch_crazy_deals(&config.warehouse_dataset).await;
    let promotions = warehouse.fetch_promotions(&config.warehouse_dataset).await;

    let activity_rows = sheets
        .fetch_rows(
            &config.activity_spreadsheet_id,
            &config.activity_sheet_name,
        )
        .await
        .context("reading channel-activity sheet")?;
    let activity = ActivityResolver::from_records(
        activity_rows
            .into_iter()
            .filter_map(|row| {
                let mut cells = row.into_iter();
                let sku = cells.next()?;
                if sku.is_empty() {
                    return None;
                }
                Some(ActivityRecord {
                    sku,
                    is_active: cells.next().unwrap_or_default(),
                })
            })
            .collect(),
    );

    let source_values = sheets
        .fetch_rows(&config.source_spreadsheet_id, &config.source_sheet_name)
        .await
        .context("reading weekly deals sheet")?;

    let excluded_background_color = config
        .excluded_row_color
        .clone()
        .or_else(|| schema.default_excluded_color().map(str::to_owned));

    let backgrounds = if excluded_background_color.is_some() {
        sheets
            .fetch_first_column_backgrounds(
                &config.source_spreadsheet_id,
                &config.source_sheet_name,
            )
            .await
            .context("reading row background colors")?
    } else {
        Vec::new()
    };

    let source_rows: Vec<SourceRow> = source_values
        .into_iter()
        .enumerate()
        .map(|(idx, cells)| {
            SourceRow::with_background(cells, backgrounds.get(idx).cloned().flatten())
        })
        .collect();

    let reconcile_config = ReconcileConfig {
        schema,
        output_mode: output.unwrap_or_else(|| schema.default_output_mode()),
        horizon_days,
        excluded_background_color,
    };
    let today = chrono::Local::now().date_naive();
    let summary = reconcile(
        &source_rows,
        &promotions,
        &crazy_deals,
        &activity,
        &reconcile_config,
        today,
    );

    let cells: Vec<Vec<String>> = summary.rows.iter().map(ReportRow::to_cells).collect();
    sheets
        .write_report(
            &config.dest_spreadsheet_id,
            &config.dest_sheet_name,
            &REPORT_HEADER,
            &cells,
        )
        .await
        .context("writing destination report")?;

    tracing::info!(
        rows_processed = summary.rows_read,
        rows_written = cells.len(),
        "reconciliation complete"
    );
    Ok(())
}
