//! HTTP client for the analytics warehouse's query endpoint.
//!
//! Wraps `reqwest` with bearer auth, the fixed-delay retry policy, and
//! typed row deserialization. Feed fetches degrade to an empty result set
//! after the retry budget: reconciliation still runs and unmatched rows
//! surface as issues instead of the whole run failing.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use dealrecon_core::{CrazyDealRecord, PromotionRecord};

use crate::error::WarehouseError;
use crate::queries;
use crate::retry::retry_fixed_delay;
use crate::types::{CrazyDealRow, PromotionRow, QueryResponse};

/// Client for the warehouse query endpoint.
///
/// Use [`WarehouseClient::new`] with the configured base URL; tests point
/// it at a wiremock server.
pub struct WarehouseClient {
    client: Client,
    token: String,
    queries_url: Url,
    max_attempts: u32,
    retry_delay: Duration,
}

impl WarehouseClient {
    /// Creates a client for the warehouse at `base_url`.
    ///
    /// `max_attempts` is the total attempt budget per query (not extra
    /// retries); `retry_delay_secs` is the flat pause between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WarehouseError::Query`] if `base_url`
    /// is not a valid URL.
    pub fn new(
        base_url: &str,
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, WarehouseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let queries_url = Url::parse(&normalised)
            .and_then(|base| base.join("queries"))
            .map_err(|e| WarehouseError::Query(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            queries_url,
            max_attempts: max_attempts.max(1),
            retry_delay: Duration::from_secs(retry_delay_secs),
        })
    }

    /// Fetches the events feed, degrading to an empty set on failure.
    pub async fn fetch_promotions(&self, dataset: &str) -> Vec<PromotionRecord> {
        let sql = queries::events_query(dataset);
        match self.run_query::<PromotionRow>(&sql, "events view").await {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), "rows read from events view");
                rows.into_iter().map(Into::into).collect()
            }
            Err(err) => {
                tracing::error!(error = %err, "events query failed; continuing with an empty feed");
                Vec::new()
            }
        }
    }

    /// Fetches the crazy-deals feed, degrading to an empty set on failure.
    pub async fn fetch_crazy_deals(&self, dataset: &str) -> Vec<CrazyDealRecord> {
        let sql = queries::crazy_deals_query(dataset);
        match self
            .run_query::<CrazyDealRow>(&sql, "crazy-deals view")
            .await
        {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), "rows read from crazy-deals view");
                rows.into_iter().map(Into::into).collect()
            }
            Err(err) => {
                tracing::error!(error = %err, "crazy-deals query failed; continuing with an empty feed");
                Vec::new()
            }
        }
    }

    /// Executes one SQL query with the retry policy and deserializes the
    /// row set.
    ///
    /// # Errors
    ///
    /// - [`WarehouseError::Unavailable`] — HTTP 503 on every attempt.
    /// - [`WarehouseError::Query`] — the warehouse rejected the query.
    /// - [`WarehouseError::Http`] — network failure or other non-2xx status.
    /// - [`WarehouseError::Deserialize`] — rows do not match the expected shape.
    pub async fn run_query<T: DeserializeOwned>(
        &self,
        sql: &str,
        context: &str,
    ) -> Result<Vec<T>, WarehouseError> {
        retry_fixed_delay(self.max_attempts, self.retry_delay, || {
            self.run_query_once::<T>(sql, context)
        })
        .await
    }

    async fn run_query_once<T: DeserializeOwned>(
        &self,
        sql: &str,
        context: &str,
    ) -> Result<Vec<T>, WarehouseError> {
        let response = self
            .client
            .post(self.queries_url.clone())
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "query": sql }))
            .send()
            .await?;

        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Err(WarehouseError::Unavailable {
                status: response.status().as_u16(),
            });
        }
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| WarehouseError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Self::check_query_error(&value)?;

        let envelope: QueryResponse<T> =
            serde_json::from_value(value).map_err(|e| WarehouseError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Ok(envelope.rows)
    }

    /// Checks the top-level `"status"` field and surfaces warehouse-side
    /// failures as [`WarehouseError::Query`].
    fn check_query_error(body: &serde_json::Value) -> Result<(), WarehouseError> {
        if body.get("status").and_then(serde_json::Value::as_str) == Some("ERROR") {
            let msg = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(WarehouseError::Query(msg));
        }
        Ok(())
    }
}
