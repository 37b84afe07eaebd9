//! Wire shapes for warehouse query responses.
//!
//! ## Observed row quirks
//!
//! - Identifier columns (`promotion_id`, `MMID`, crazy-deal `item_id`)
//!   arrive as numbers or strings depending on the view's cast; [`IdValue`]
//!   accepts both and everything downstream works with strings.
//! - Date columns arrive in any of the [`BackendDate`] encodings; they are
//!   carried raw and normalized only at comparison/output time.
//! - `maximum_purchase` is null for uncapped deals.

use rust_decimal::Decimal;
use serde::Deserialize;

use dealrecon_core::{BackendDate, CrazyDealRecord, PromotionRecord};

/// Response envelope for `POST /queries`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    #[serde(default)]
    pub rows: Vec<T>,
}

/// An identifier column that may arrive as a JSON number or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s,
        }
    }
}

/// One row of the events view.
#[derive(Debug, Deserialize)]
pub struct PromotionRow {
    pub item_id: i64,
    pub promotion_id: IdValue,
    #[serde(rename = "type")]
    pub kind: String,
    pub sale_price: Decimal,
    #[serde(default)]
    pub start_date: Option<BackendDate>,
    #[serde(default)]
    pub end_date: Option<BackendDate>,
    #[serde(default)]
    pub sales_channel: Option<String>,
}

impl From<PromotionRow> for PromotionRecord {
    fn from(row: PromotionRow) -> Self {
        PromotionRecord {
            item_id: row.item_id,
            promotion_id: row.promotion_id.into_string(),
            kind: row.kind,
            sale_price: row.sale_price,
            start_date: row.start_date,
            end_date: row.end_date,
            sales_channel: row.sales_channel,
        }
    }
}

/// One row of the crazy-deals view.
#[derive(Debug, Deserialize)]
pub struct CrazyDealRow {
    pub item_id: IdValue,
    #[serde(default)]
    pub start_date: Option<BackendDate>,
    #[serde(default)]
    pub end_date: Option<BackendDate>,
    #[serde(rename = "MMID")]
    pub mmid: IdValue,
    pub minimum_purchase: Decimal,
    pub crazy_deal_percent: Decimal,
    #[serde(default)]
    pub maximum_purchase: Option<Decimal>,
}

impl From<CrazyDealRow> for CrazyDealRecord {
    fn from(row: CrazyDealRow) -> Self {
        CrazyDealRecord {
            item_id: row.item_id.into_string(),
            start_date: row.start_date,
            end_date: row.end_date,
            mmid: row.mmid.into_string(),
            minimum_purchase: row.minimum_purchase,
            crazy_deal_percent: row.crazy_deal_percent,
            maximum_purchase: row.maximum_purchase,
        }
    }
}
