//! Supported currencies and display formatting.
//!
//! The currency is a closed enum rather than a free-form code: every
//! supported code carries a static display symbol, and unsupported codes
//! are rejected at deserialization instead of falling through to a
//! placeholder at render time.

use serde::{Deserialize, Serialize};

/// A supported invoice currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Pakistani Rupee
    #[default]
    #[serde(rename = "PKR")]
    Pkr,
    /// Malaysian Ringgit
    #[serde(rename = "MYR")]
    Myr,
}

impl Currency {
    /// The ISO 4217 code, as shown in the currency selector.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pkr => "PKR",
            Currency::Myr => "MYR",
        }
    }

    /// The display symbol prefixed to formatted amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Pkr => "\u{20A8}",
            Currency::Myr => "RM",
        }
    }

    /// Format an amount as `<symbol> <grouped amount>` with exactly two
    /// fractional digits, e.g. `format(5000.0)` for PKR is `"₨ 5,000.00"`.
    pub fn format(&self, amount: f64) -> String {
        format!("{} {}", self.symbol(), format_amount(amount))
    }
}

/// Format a numeric amount with two fractional digits and comma
/// thousands separators. Non-finite input formats as zero.
pub fn format_amount(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    // Round to cents first so 999.999 groups as 1,000.00, not 999.100.
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pkr_symbol_and_grouping() {
        assert_eq!(Currency::Pkr.format(5000.0), "\u{20A8} 5,000.00");
    }

    #[test]
    fn test_myr_zero() {
        assert_eq!(Currency::Myr.format(0.0), "RM 0.00");
    }

    #[test]
    fn test_large_amount_grouping() {
        assert_eq!(format_amount(1234567.89), "1,234,567.89");
    }

    #[test]
    fn test_rounding_carries_into_grouping() {
        assert_eq!(format_amount(999.999), "1,000.00");
    }

    #[test]
    fn test_small_amounts_ungrouped() {
        assert_eq!(format_amount(0.5), "0.50");
        assert_eq!(format_amount(999.0), "999.00");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(Currency::Pkr.format(-12.5), "\u{20A8} -12.50");
    }

    #[test]
    fn test_non_finite_formats_as_zero() {
        assert_eq!(format_amount(f64::NAN), "0.00");
        assert_eq!(format_amount(f64::INFINITY), "0.00");
    }

    #[test]
    fn test_pure_function_stable_output() {
        let a = Currency::Pkr.format(6500.0);
        let b = Currency::Pkr.format(6500.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_codes() {
        let c: Currency = serde_json::from_str(r#""MYR""#).unwrap();
        assert_eq!(c, Currency::Myr);
        assert_eq!(serde_json::to_string(&Currency::Pkr).unwrap(), r#""PKR""#);
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(serde_json::from_str::<Currency>(r#""XYZ""#).is_err());
    }
}
