//! Per-SKU record matching against the two backend feeds.
//!
//! The trimmed routing cell picks exactly one feed: `"N/A"` means the deal
//! has no crazy-deal copy and must be backed by a promotional event, any
//! other value means the copy describes a crazy deal. A SKU that finds no
//! backing record is not an error — it becomes an issue row for human
//! review.

use rust_decimal::{Decimal, RoundingStrategy};

use dealrecon_core::{
    backend_date_as_naive, normalize_backend_date, CrazyDealRecord, PromotionRecord, ReportRow,
    MISSING,
};

use crate::dates::DateWindow;
use crate::price::{parse_price_text, PricePair};

/// Placeholder for fields that do not apply to the matched feed.
const NA: &str = "na";

/// Everything the matcher needs about one (source row, SKU) pair.
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    pub sku: &'a str,
    /// First whitespace token of the raw date text.
    pub days: &'a str,
    pub window: DateWindow,
    pub product_name: &'a str,
    pub product_type: &'a str,
    /// Channel-activity flag already resolved for this SKU.
    pub active: &'a str,
    /// Raw price-copy cell, parsed only on a crazy-deals miss.
    pub price_copy: &'a str,
    /// `true` when the trimmed routing cell equals `"N/A"`.
    pub route_to_events: bool,
}

/// Feed-specific half of a report row; the builder fills in the shared
/// source-row fields.
struct Resolution {
    start_date: String,
    end_date: String,
    mmid: String,
    buy: String,
    get: String,
    promotion_id: String,
    sale_price: String,
    issue: bool,
}

/// Matches one SKU against the feed its routing cell selects and shapes
/// the outcome into a [`ReportRow`].
#[must_use]
pub fn match_sku(
    input: &MatchInput<'_>,
    promotions: &[PromotionRecord],
    crazy_deals: &[CrazyDealRecord],
) -> ReportRow {
    let resolution = if input.route_to_events {
        match_events(input, promotions)
    } else {
        match_crazy_deals(input, crazy_deals)
    };
    build_row(input, resolution)
}

/// Events path: the SKU must parse as an integer item id, and the
/// promotion's window must contain the source window on both ends
/// (inclusive). A SKU that is not numeric can never match and falls
/// through to the issue arm.
fn match_events(input: &MatchInput<'_>, promotions: &[PromotionRecord]) -> Resolution {
    let item_id: Option<i64> = input.sku.parse().ok();
    let matched = item_id.and_then(|id| {
        promotions.iter().find(|promo| {
            promo.item_id == id
                && backend_date_as_naive(promo.start_date.as_ref())
                    .is_some_and(|start| start <= input.window.begin)
                && backend_date_as_naive(promo.end_date.as_ref())
                    .is_some_and(|end| end >= input.window.end)
        })
    });

    match matched {
        Some(promo) => Resolution {
            start_date: NA.to_owned(),
            end_date: NA.to_owned(),
            mmid: NA.to_owned(),
            buy: NA.to_owned(),
            get: NA.to_owned(),
            promotion_id: promo.promotion_id.clone(),
            sale_price: promo.sale_price.to_string(),
            issue: false,
        },
        None => Resolution {
            start_date: NA.to_owned(),
            end_date: NA.to_owned(),
            mmid: NA.to_owned(),
            buy: NA.to_owned(),
            get: NA.to_owned(),
            promotion_id: MISSING.to_owned(),
            sale_price: MISSING.to_owned(),
            issue: true,
        },
    }
}

/// Crazy-deals path: exact string match on the item id, no window check.
/// On a miss the price copy itself is parsed so the report still shows
/// what the sheet promised.
fn match_crazy_deals(input: &MatchInput<'_>, crazy_deals: &[CrazyDealRecord]) -> Resolution {
    match crazy_deals.iter().find(|deal| deal.item_id == input.sku) {
        Some(deal) => Resolution {
            start_date: normalize_backend_date(deal.start_date.as_ref()),
            end_date: normalize_backend_date(deal.end_date.as_ref()),
            mmid: deal.mmid.clone(),
            buy: deal.minimum_purchase.to_string(),
            get: gift_card_amount(deal.minimum_purchase, deal.crazy_deal_percent),
            promotion_id: NA.to_owned(),
            sale_price: NA.to_owned(),
            issue: false,
        },
        None => {
            let pair = parse_price_text(input.price_copy).unwrap_or_else(PricePair::missing);
            Resolution {
                start_date: MISSING.to_owned(),
                end_date: MISSING.to_owned(),
                mmid: MISSING.to_owned(),
                buy: pair.buy,
                get: pair.get,
                promotion_id: NA.to_owned(),
                sale_price: NA.to_owned(),
                issue: true,
            }
        }
    }
}

/// Gift-card value of a crazy deal: `minimum_purchase × percent / 100`,
/// rounded half-away-from-zero to cents and rendered with two decimals.
fn gift_card_amount(minimum_purchase: Decimal, percent: Decimal) -> String {
    let amount = (minimum_purchase * percent / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{amount:.2}")
}

/// Shapes a match outcome into the fixed report schema.
fn build_row(input: &MatchInput<'_>, resolution: Resolution) -> ReportRow {
    ReportRow {
        days: input.days.to_owned(),
        beg_dt: input.window.begin_iso(),
        end_dt: input.window.end_iso(),
        sku: input.sku.to_owned(),
        product_name: input.product_name.to_owned(),
        active: input.active.to_owned(),
        product_type: input.product_type.to_owned(),
        start_date: resolution.start_date,
        end_date: resolution.end_date,
        mmid: resolution.mmid,
        buy: resolution.buy,
        get: resolution.get,
        promotion_id: resolution.promotion_id,
        sale_price: resolution.sale_price,
        issue: resolution.issue,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use dealrecon_core::BackendDate;

    use super::*;
    use crate::parse_date_window;

    fn window(begin: &str, end: &str) -> DateWindow {
        DateWindow {
            begin: NaiveDate::parse_from_str(begin, "%Y-%m-%d").unwrap(),
            end: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        }
    }

    fn input<'a>(sku: &'a str, w: DateWindow, price_copy: &'a str, events: bool) -> MatchInput<'a> {
        MatchInput {
            sku,
            days: "2/1/25",
            window: w,
            product_name: "Widget",
            product_type: "Apparel",
            active: "true",
            price_copy,
            route_to_events: events,
        }
    }

    fn promotion(item_id: i64, start: &str, end: &str) -> PromotionRecord {
        PromotionRecord {
            item_id,
            promotion_id: "9001".to_owned(),
            kind: "Insider Exclusive".to_owned(),
            sale_price: "19.99".parse().unwrap(),
            start_date: Some(BackendDate::Plain(start.to_owned())),
            end_date: Some(BackendDate::Plain(end.to_owned())),
            sales_channel: Some("Web".to_owned()),
        }
    }

    fn crazy_deal(item_id: &str, minimum: &str, percent: &str) -> CrazyDealRecord {
        CrazyDealRecord {
            item_id: item_id.to_owned(),
            start_date: Some(BackendDate::Plain("2025-01-30".to_owned())),
            end_date: Some(BackendDate::Wrapped {
                value: "2025-02-10".to_owned(),
            }),
            mmid: "777".to_owned(),
            minimum_purchase: minimum.parse().unwrap(),
            crazy_deal_percent: percent.parse().unwrap(),
            maximum_purchase: None,
        }
    }

    #[test]
    fn events_containment_matches() {
        let promos = vec![promotion(100, "2024-01-01", "2024-01-31")];
        let row = match_sku(
            &input("100", window("2024-01-10", "2024-01-15"), "N/A", true),
            &promos,
            &[],
        );
        assert!(!row.issue);
        assert_eq!(row.promotion_id, "9001");
        assert_eq!(row.sale_price, "19.99");
        assert_eq!(row.start_date, "na");
        assert_eq!(row.buy, "na");
    }

    #[test]
    fn events_partial_overlap_is_issue() {
        let promos = vec![promotion(100, "2024-01-12", "2024-01-31")];
        let row = match_sku(
            &input("100", window("2024-01-10", "2024-01-15"), "N/A", true),
            &promos,
            &[],
        );
        assert!(row.issue);
        assert_eq!(row.promotion_id, "missing");
        assert_eq!(row.sale_price, "missing");
    }

    #[test]
    fn events_containment_bounds_are_inclusive() {
        let promos = vec![promotion(100, "2024-01-10", "2024-01-15")];
        let row = match_sku(
            &input("100", window("2024-01-10", "2024-01-15"), "N/A", true),
            &promos,
            &[],
        );
        assert!(!row.issue);
    }

    #[test]
    fn events_non_numeric_sku_is_issue() {
        let promos = vec![promotion(100, "2024-01-01", "2024-01-31")];
        let row = match_sku(
            &input("AB-100", window("2024-01-10", "2024-01-15"), "N/A", true),
            &promos,
            &[],
        );
        assert!(row.issue);
    }

    #[test]
    fn events_missing_backend_dates_never_match() {
        let mut promo = promotion(100, "2024-01-01", "2024-01-31");
        promo.end_date = None;
        let row = match_sku(
            &input("100", window("2024-01-10", "2024-01-15"), "N/A", true),
            &[promo],
            &[],
        );
        assert!(row.issue);
    }

    #[test]
    fn crazy_deal_match_computes_gift_card() {
        let deals = vec![crazy_deal("200", "50", "10")];
        let row = match_sku(
            &input("200", window("2025-02-01", "2025-02-01"), "Buy stuff", false),
            &[],
            &deals,
        );
        assert!(!row.issue);
        assert_eq!(row.buy, "50");
        assert_eq!(row.get, "5.00");
        assert_eq!(row.mmid, "777");
        assert_eq!(row.start_date, "2025-01-30");
        assert_eq!(row.end_date, "2025-02-10");
        assert_eq!(row.promotion_id, "na");
        assert_eq!(row.sale_price, "na");
    }

    #[test]
    fn gift_card_rounds_to_cents() {
        assert_eq!(
            gift_card_amount("33.33".parse().unwrap(), "15".parse().unwrap()),
            "5.00"
        );
        assert_eq!(
            gift_card_amount("49.99".parse().unwrap(), "10".parse().unwrap()),
            "5.00"
        );
        assert_eq!(
            gift_card_amount("20".parse().unwrap(), "12.5".parse().unwrap()),
            "2.50"
        );
    }

    #[test]
    fn crazy_deal_miss_parses_price_copy() {
        let row = match_sku(
            &input(
                "200",
                window("2025-02-01", "2025-02-01"),
                "Buy for $20 get $5 off",
                false,
            ),
            &[],
            &[],
        );
        assert!(row.issue);
        assert_eq!(row.buy, "20.00");
        assert_eq!(row.get, "5.00");
        assert_eq!(row.start_date, "missing");
        assert_eq!(row.mmid, "missing");
    }

    #[test]
    fn crazy_deal_miss_with_unparseable_copy_uses_sentinels() {
        let row = match_sku(
            &input("200", window("2025-02-01", "2025-02-01"), "Hot deal!", false),
            &[],
            &[],
        );
        assert!(row.issue);
        assert_eq!(row.buy, "missing");
        assert_eq!(row.get, "missing");
    }

    #[test]
    fn crazy_deal_item_id_is_exact_string_match() {
        let deals = vec![crazy_deal("0200", "50", "10")];
        let row = match_sku(
            &input("200", window("2025-02-01", "2025-02-01"), "copy", false),
            &[],
            &deals,
        );
        assert!(row.issue, "leading-zero ids must not match bare ids");
    }

    #[test]
    fn window_fields_come_from_the_source_row() {
        let w = parse_date_window("2/1/25").unwrap();
        let row = match_sku(&input("1", w, "copy", false), &[], &[]);
        assert_eq!(row.days, "2/1/25");
        assert_eq!(row.beg_dt, "2025-02-01");
        assert_eq!(row.end_dt, "2025-02-01");
    }
}
