//! Price formatting
//!
//! Prices are stored as integer minor units (cents). Display divides by 100
//! through `rust_decimal` so no float rounding ever leaks into a menu.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display currency of a restaurant menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// US dollars, `$12.99`
    #[default]
    Usd,
    /// Lebanese pounds, bare decimal with suffix, `1,500 L.L.`
    Lbp,
}

impl Currency {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "usd" => Some(Self::Usd),
            "lbp" => Some(Self::Lbp),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Lbp => "lbp",
        }
    }
}

/// Format minor units as US dollars: `format_price(1299) == "$12.99"`.
pub fn format_price(minor_units: i64) -> String {
    format_price_in(minor_units, Currency::Usd)
}

/// Format minor units in the given currency.
///
/// Total over `i64`: negative values get a leading minus sign.
pub fn format_price_in(minor_units: i64, currency: Currency) -> String {
    let value = Decimal::new(minor_units, 2);
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = value.abs();

    match currency {
        Currency::Usd => format!("{sign}${}", group_thousands(&abs.to_string())),
        Currency::Lbp => format!(
            "{sign}{} L.L.",
            group_thousands(&abs.normalize().to_string())
        ),
    }
}

/// Insert `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain, None),
    };

    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3 + 4);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_usd() {
        assert_eq!(format_price(1299), "$12.99");
        assert_eq!(format_price(0), "$0.00");
        assert_eq!(format_price(5), "$0.05");
        assert_eq!(format_price(100), "$1.00");
    }

    #[test]
    fn test_format_price_thousands() {
        assert_eq!(format_price(123_456), "$1,234.56");
        assert_eq!(format_price(123_456_789), "$1,234,567.89");
        assert_eq!(format_price(100_000), "$1,000.00");
        assert_eq!(format_price(99_999), "$999.99");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(-250), "-$2.50");
        assert_eq!(format_price(-100_000), "-$1,000.00");
    }

    #[test]
    fn test_format_price_extremes_do_not_panic() {
        assert_eq!(format_price(i64::MAX), "$92,233,720,368,547,758.07");
        assert_eq!(format_price(i64::MIN), "-$92,233,720,368,547,758.08");
    }

    #[test]
    fn test_format_price_lbp() {
        assert_eq!(format_price_in(150_000, Currency::Lbp), "1,500 L.L.");
        assert_eq!(format_price_in(150_050, Currency::Lbp), "1,500.5 L.L.");
        assert_eq!(format_price_in(99, Currency::Lbp), "0.99 L.L.");
        assert_eq!(format_price_in(0, Currency::Lbp), "0 L.L.");
    }

    #[test]
    fn test_currency_db_roundtrip() {
        for c in [Currency::Usd, Currency::Lbp] {
            assert_eq!(Currency::from_db(c.as_db()), Some(c));
        }
        assert_eq!(Currency::from_db("eur"), None);
    }

    #[test]
    fn test_currency_serde() {
        let json = serde_json::to_string(&Currency::Lbp).unwrap();
        assert_eq!(json, "\"lbp\"");
    }
}
