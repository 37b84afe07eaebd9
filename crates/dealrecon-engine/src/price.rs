//! Buy/get price extraction from promotional copy.
//!
//! The status cell carries merchandising copy rather than structured data,
//! e.g. `"Buy for $20 get $5 off"`. Two patterns cover the copy in use;
//! the range pattern must be tried first because its wording is a
//! superset-shaped match of the single pattern's vocabulary.

use std::sync::LazyLock;

use regex::Regex;

use dealrecon_core::MISSING;

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Buy for \$?(\d{1,7}(?:\.\d{2})?)-\$?(\d{1,7}(?:\.\d{2})?) and get a Crazy Deal Gift Card of Equal Value",
    )
    .expect("range price pattern is valid")
});

static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Buy for \$(\d{1,7}(?:\.\d{2})?)[^\d]+\$(\d{1,7}(?:\.\d{2})?)")
        .expect("single price pattern is valid")
});

/// Buy/get amounts extracted from promotional copy, already formatted for
/// the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePair {
    pub buy: String,
    pub get: String,
}

impl PricePair {
    /// The sentinel pair substituted when the copy is unparseable.
    #[must_use]
    pub fn missing() -> Self {
        Self {
            buy: MISSING.to_owned(),
            get: MISSING.to_owned(),
        }
    }
}

/// Extracts a [`PricePair`] from promotional copy.
///
/// A range (`Buy for $A-$B and get a Crazy Deal Gift Card of Equal Value`)
/// keeps both amounts as the literal `"A-B"` string. A single pattern
/// (`Buy for $A ... $B`) formats each amount with exactly two decimal
/// digits. Returns `None` when neither pattern matches.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<PricePair> {
    if let Some(caps) = RANGE.captures(text) {
        let range = format!("{}-{}", &caps[1], &caps[2]);
        return Some(PricePair {
            buy: range.clone(),
            get: range,
        });
    }

    let caps = SINGLE.captures(text)?;
    Some(PricePair {
        buy: fixed_point(&caps[1]),
        get: fixed_point(&caps[2]),
    })
}

/// Appends `.00` to whole-dollar amounts; amounts with cents pass through.
fn fixed_point(amount: &str) -> String {
    if amount.contains('.') {
        amount.to_owned()
    } else {
        format!("{amount}.00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_keeps_literal_span() {
        let pair =
            parse_price_text("Buy for $50-$75 and get a Crazy Deal Gift Card of Equal Value")
                .unwrap();
        assert_eq!(pair.buy, "50-75");
        assert_eq!(pair.get, "50-75");
    }

    #[test]
    fn range_is_case_insensitive() {
        let pair =
            parse_price_text("buy for $50-$75 and get a crazy deal gift card of equal value")
                .unwrap();
        assert_eq!(pair.buy, "50-75");
    }

    #[test]
    fn range_wins_over_single() {
        // The range copy also matches the single pattern's shape; range must
        // be attempted first.
        let pair =
            parse_price_text("Buy for $100-$150 and get a Crazy Deal Gift Card of Equal Value")
                .unwrap();
        assert_eq!(pair.buy, "100-150");
    }

    #[test]
    fn single_pads_whole_dollars() {
        let pair = parse_price_text("Buy for $20 get $5 off").unwrap();
        assert_eq!(pair.buy, "20.00");
        assert_eq!(pair.get, "5.00");
    }

    #[test]
    fn single_keeps_cents() {
        let pair = parse_price_text("Buy for $19.99 and get a $4.50 reward").unwrap();
        assert_eq!(pair.buy, "19.99");
        assert_eq!(pair.get, "4.50");
    }

    #[test]
    fn unparseable_is_none() {
        assert!(parse_price_text("N/A").is_none());
        assert!(parse_price_text("").is_none());
        assert!(parse_price_text("Save big this week").is_none());
    }

    #[test]
    fn missing_pair_sentinels() {
        let pair = PricePair::missing();
        assert_eq!(pair.buy, "missing");
        assert_eq!(pair.get, "missing");
    }
}
