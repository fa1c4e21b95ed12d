//! Derived invoice totals.
//!
//! Recomputed whenever the subtotal, either GST percentage or the item list
//! changes:
//!
//! | Field                   | Derivation                                     |
//! |-------------------------|------------------------------------------------|
//! | `amount`                | Sum of item due-now amounts (item changes), else the entered subtotal |
//! | `cgst_amount`           | `amount × cgst% / 100`                         |
//! | `sgst_amount`           | `amount × sgst% / 100`                         |
//! | `total_amount`          | `amount + cgst_amount + sgst_amount`           |
//! | `tax_amount_in_words`   | words of `cgst_amount + sgst_amount`           |
//! | `total_amount_in_words` | `Rupees <words of total_amount> Only`          |
//!
//! Amounts keep full precision; only the display layer rounds to paisa.
//! Missing or unparseable inputs count as zero, so recomputation never fails.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bill_core::NumericField;
//! use bill_core::calculations::recompute_totals;
//!
//! let totals = recompute_totals(
//!     &NumericField::from(dec!(1266838)),
//!     &NumericField::from(dec!(9)),
//!     &NumericField::from(dec!(9)),
//!     None,
//! );
//!
//! assert_eq!(totals.cgst_amount, dec!(114015.42));
//! assert_eq!(totals.total_amount, dec!(1494868.84));
//! assert_eq!(
//!     totals.total_amount_in_words,
//!     "Rupees Fourteen Lakh Ninety Four Thousand Eight Hundred Sixty Eight and Eighty Four Paisa Only"
//! );
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{checked_sum, percent_of};
use crate::calculations::words::{number_to_words, rupees_in_words};
use crate::models::{LineItem, NumericField};

/// Values derived from an invoice's subtotal, tax percentages and items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// The subtotal the taxes were computed on.
    pub amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub total_amount: Decimal,
    /// Words of the combined CGST + SGST; empty when there is no tax.
    pub tax_amount_in_words: String,
    /// `Rupees ... Only`; empty when the total is zero.
    pub total_amount_in_words: String,
}

impl Totals {
    /// Combined CGST and SGST.
    pub fn tax_amount(&self) -> Decimal {
        checked_sum(self.cgst_amount, self.sgst_amount)
    }
}

/// Amount currently payable for one item: `total_value × due_now_percent / 100`.
///
/// Returns `None` when either operand is empty or not a number; callers
/// leave the stored due-now amount unchanged in that case.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bill_core::NumericField;
/// use bill_core::calculations::due_now_amount;
///
/// let total = NumericField::from(dec!(1266838));
///
/// assert_eq!(due_now_amount(&total, &NumericField::from(dec!(100))), Some(dec!(1266838)));
/// assert_eq!(due_now_amount(&total, &NumericField::from(dec!(50))), Some(dec!(633419)));
/// assert_eq!(due_now_amount(&total, &NumericField::Empty), None);
/// ```
pub fn due_now_amount(
    total_value: &NumericField,
    due_now_percent: &NumericField,
) -> Option<Decimal> {
    let total_value = total_value.value()?;
    let due_now_percent = due_now_percent.value()?;
    Some(percent_of(total_value, due_now_percent))
}

/// Sum of every item's due-now amount. Items without one contribute zero.
pub fn subtotal_from_items(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(LineItem::contribution)
        .fold(Decimal::ZERO, checked_sum)
}

/// Recomputes every derived invoice field.
///
/// When `items` is `Some`, the item sum replaces `amount` as the subtotal.
/// Pass `None` when the triggering change was to the subtotal or a
/// percentage, so a manually typed subtotal is kept.
pub fn recompute_totals(
    amount: &NumericField,
    cgst_percent: &NumericField,
    sgst_percent: &NumericField,
    items: Option<&[LineItem]>,
) -> Totals {
    let amount = match items {
        Some(items) => subtotal_from_items(items),
        None => amount.or_zero(),
    };

    let cgst_amount = percent_of(amount, cgst_percent.or_zero());
    let sgst_amount = percent_of(amount, sgst_percent.or_zero());
    let tax_amount = checked_sum(cgst_amount, sgst_amount);
    let total_amount = checked_sum(amount, tax_amount);

    debug!(
        %amount,
        %cgst_amount,
        %sgst_amount,
        %total_amount,
        from_items = items.is_some(),
        "recomputed totals"
    );

    Totals {
        amount,
        cgst_amount,
        sgst_amount,
        total_amount,
        tax_amount_in_words: number_to_words(tax_amount),
        total_amount_in_words: rupees_in_words(total_amount),
    }
}
