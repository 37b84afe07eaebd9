//! Embedded SQL for the two promotion views.
//!
//! Both queries join the promotion dimension to its items and keep only
//! rows whose validity window is still current. The dataset qualifier is
//! spliced in from configuration so staging and production warehouses can
//! host the same views.

/// Query for the events feed: confirmed `Insider Exclusive` promotion
/// windows per item, with the effective sale price.
#[must_use]
pub fn events_query(dataset: &str) -> String {
    format!(
        "SELECT \
           CAST(d.item_id AS INT64) AS item_id, \
           item.sales_channel, \
           h.promotion_id, \
           h.type, \
           item.regular_price + d.discount_amount AS sale_price, \
           h.start_date, \
           h.end_date \
         FROM `{dataset}.dim_promotion` h \
         LEFT JOIN `{dataset}.dim_promotion_item` d ON h.promotion_sk = d.promotion_sk \
         LEFT JOIN `{dataset}.dim_item` item ON d.item_id = item.item_id \
         WHERE h.dbt_valid_to IS NULL \
           AND d.dbt_valid_to IS NULL \
           AND item.dbt_valid_to IS NULL \
           AND NOT h.is_location_specific \
           AND h.start_date >= '2024-01-01' \
           AND h.end_date >= CURRENT_DATE() \
           AND h.type = 'Insider Exclusive' \
           AND (d.discount_amount IS NOT NULL AND d.discount_amount <> 0) \
         ORDER BY CAST(d.item_id AS INT64), h.promotion_id"
    )
}

/// Query for the crazy-deals feed: open `Crazy Deal` promotions with their
/// minimum-purchase and percentage terms. Promotion 220 is a permanent
/// storewide program, not a weekly deal, and is excluded.
#[must_use]
pub fn crazy_deals_query(dataset: &str) -> String {
    format!(
        "SELECT \
           d.item_id, \
           h.is_insider_exclusive, \
           h.start_date, \
           h.end_date, \
           h.promotion_id AS MMID, \
           h.minimum_purchase, \
           h.crazy_deal_percent, \
           h.maximum_purchase \
         FROM `{dataset}.dim_promotion` h \
         LEFT JOIN `{dataset}.dim_promotion_item` d ON h.promotion_sk = d.promotion_sk \
         LEFT JOIN `{dataset}.dim_item` item ON d.item_id = item.item_id \
         WHERE h.dbt_valid_to IS NULL \
           AND d.dbt_valid_to IS NULL \
           AND item.dbt_valid_to IS NULL \
           AND h.end_date >= CURRENT_DATE() \
           AND h.type IN ('Crazy Deal') \
           AND h.promotion_id NOT IN ('220') \
         ORDER BY d.item_id"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_query_qualifies_all_tables() {
        let sql = events_query("analytics.core");
        assert!(sql.contains("`analytics.core.dim_promotion`"));
        assert!(sql.contains("`analytics.core.dim_promotion_item`"));
        assert!(sql.contains("`analytics.core.dim_item`"));
        assert!(sql.contains("'Insider Exclusive'"));
    }

    #[test]
    fn crazy_deals_query_excludes_promotion_220() {
        let sql = crazy_deals_query("analytics.core");
        assert!(sql.contains("NOT IN ('220')"));
        assert!(sql.contains("'Crazy Deal'"));
    }
}
