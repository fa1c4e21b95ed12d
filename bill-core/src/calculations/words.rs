//! Amount-in-words conversion using the Indian numbering system.
//!
//! Rupee amounts are grouped as crore (10^7), lakh (10^5), thousand (10^3)
//! and hundred, the way they are written on Indian tax invoices:
//!
//! | Value          | Words                                                    |
//! |----------------|----------------------------------------------------------|
//! | `1266838`      | Twelve Lakh Sixty Six Thousand Eight Hundred Thirty Eight |
//! | `100000000`    | Ten Crore                                                |
//! | `45.50`        | Forty Five and Fifty Paisa                               |
//!
//! Only crore is defined as a scale word, so integer parts of ten digits or
//! more (100 crore and above) produce [`TOO_LARGE`] instead of words.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::calculations::common::{HUNDRED, round_half_up};

/// Returned in place of words for amounts of 100 crore or more.
pub const TOO_LARGE: &str = "Number too large";

/// Largest rupee amount that has a spelling (99,99,99,999).
const MAX_RUPEES: u64 = 999_999_999;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Scale words for the groups above the last three digits, largest first.
const SCALES: [(u64, u64, &str); 3] = [
    (10_000_000, 1_000, "Crore"),
    (100_000, 100, "Lakh"),
    (1_000, 100, "Thousand"),
];

/// Words for 0–99. Zero is the empty string.
fn below_hundred(n: u64) -> String {
    if n > 19 {
        let tens = TENS[(n / 10) as usize];
        match ONES[(n % 10) as usize] {
            "" => tens.to_string(),
            ones => format!("{tens} {ones}"),
        }
    } else {
        ONES[n as usize].to_string()
    }
}

/// Words for the final three-digit group, 1–999.
fn hundreds_group(n: u64) -> String {
    if n > 99 {
        let mut words = format!("{} Hundred", ONES[(n / 100) as usize]);
        if n % 100 > 0 {
            words.push(' ');
            words.push_str(&below_hundred(n % 100));
        }
        words
    } else {
        below_hundred(n)
    }
}

/// Spells out a rupee amount using crore/lakh/thousand/hundred grouping.
///
/// The value is rounded half-up to paisa first; a non-zero paisa part is
/// appended as `"and <words> Paisa"`. Zero yields an empty string, and the
/// `and` connector is kept even when there are no rupees to connect to.
/// Negative values have no spelling and also yield an empty string.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bill_core::calculations::words::{number_to_words, TOO_LARGE};
///
/// assert_eq!(number_to_words(dec!(0)), "");
/// assert_eq!(number_to_words(dec!(100)), "One Hundred");
/// assert_eq!(
///     number_to_words(dec!(1266838)),
///     "Twelve Lakh Sixty Six Thousand Eight Hundred Thirty Eight"
/// );
/// assert_eq!(number_to_words(dec!(45.50)), "Forty Five and Fifty Paisa");
/// assert_eq!(number_to_words(dec!(0.50)), "and Fifty Paisa");
/// assert_eq!(number_to_words(dec!(1000000000)), TOO_LARGE);
/// ```
pub fn number_to_words(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        debug!(%value, "negative amount has no spelling");
        return String::new();
    }

    let rounded = round_half_up(value);
    let whole = rounded.trunc();
    let Some(rupees) = whole.to_u64().filter(|r| *r <= MAX_RUPEES) else {
        return TOO_LARGE.to_string();
    };
    let paisa = ((rounded - whole) * HUNDRED).trunc().to_u64().unwrap_or(0);

    let mut groups: Vec<String> = SCALES
        .iter()
        .filter_map(|&(unit, modulus, scale)| {
            let group = (rupees / unit) % modulus;
            (group > 0).then(|| format!("{} {scale}", below_hundred(group)))
        })
        .collect();

    let last_three = rupees % 1_000;
    if last_three > 0 {
        groups.push(hundreds_group(last_three));
    }

    let mut words = groups.join(" ");
    if paisa > 0 {
        words.push_str(" and ");
        words.push_str(&below_hundred(paisa));
        words.push_str(" Paisa");
    }

    words.trim().to_string()
}

/// Formats the "amount in words" line printed under an invoice total.
///
/// Returns `"Rupees <words> Only"` for amounts that are positive once rounded
/// to paisa and an empty string otherwise, so a blank form does not print
/// "Rupees  Only".
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bill_core::calculations::words::rupees_in_words;
///
/// assert_eq!(rupees_in_words(dec!(590)), "Rupees Five Hundred Ninety Only");
/// assert_eq!(rupees_in_words(dec!(0)), "");
/// ```
pub fn rupees_in_words(value: Decimal) -> String {
    if round_half_up(value) <= Decimal::ZERO {
        return String::new();
    }
    format!("Rupees {} Only", number_to_words(value))
}
