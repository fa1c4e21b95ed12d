//! Display formatting for the printed invoice.
//!
//! Amounts are kept unrounded everywhere else; this is the one place they
//! are rounded to paisa.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Formats a rupee amount with two decimals and Indian digit grouping.
///
/// The last three integer digits form one group and the rest are grouped in
/// pairs, so ten lakh prints as `10,00,000.00`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bill_core::format::format_inr;
///
/// assert_eq!(format_inr(dec!(1494868.84)), "14,94,868.84");
/// assert_eq!(format_inr(dec!(590)), "590.00");
/// assert_eq!(format_inr(dec!(0.9009)), "0.90");
/// ```
pub fn format_inr(value: Decimal) -> String {
    let mut rounded = round_half_up(value).abs();
    rounded.rescale(2);
    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{fraction}", group_indian(whole))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        pairs.push(&head[start..end]);
        end = start;
    }
    pairs.reverse();

    format!("{},{last_three}", pairs.join(","))
}

/// Formats a percentage with two decimals, e.g. `9` → `"9.00"`.
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Blank input prints as `N/A`; anything that is not an ISO date is printed
/// as entered.
pub fn format_invoice_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "N/A".to_string();
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_inr_groups_lakh_and_crore() {
        assert_eq!(format_inr(dec!(1000)), "1,000.00");
        assert_eq!(format_inr(dec!(100000)), "1,00,000.00");
        assert_eq!(format_inr(dec!(1266838)), "12,66,838.00");
        assert_eq!(format_inr(dec!(123456789.5)), "12,34,56,789.50");
    }

    #[test]
    fn format_inr_rounds_half_up() {
        assert_eq!(format_inr(dec!(114015.425)), "1,14,015.43");
        assert_eq!(format_inr(dec!(999.999)), "1,000.00");
    }

    #[test]
    fn format_inr_small_and_zero() {
        assert_eq!(format_inr(Decimal::ZERO), "0.00");
        assert_eq!(format_inr(dec!(7.5)), "7.50");
    }

    #[test]
    fn format_inr_negative() {
        assert_eq!(format_inr(dec!(-1500)), "-1,500.00");
        assert_eq!(format_inr(dec!(-0.001)), "0.00");
    }

    #[test]
    fn format_percent_pads_to_two_places() {
        assert_eq!(format_percent(dec!(9)), "9.00");
        assert_eq!(format_percent(dec!(2.5)), "2.50");
        assert_eq!(format_percent(dec!(12.345)), "12.35");
    }

    #[test]
    fn format_invoice_date_uses_day_first() {
        assert_eq!(format_invoice_date("2023-10-25"), "25/10/2023");
    }

    #[test]
    fn format_invoice_date_blank_and_free_text() {
        assert_eq!(format_invoice_date(""), "N/A");
        assert_eq!(format_invoice_date("next Monday"), "next Monday");
    }
}
