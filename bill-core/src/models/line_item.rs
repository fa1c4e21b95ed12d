use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::NumericField;
use crate::calculations::totals::due_now_amount;

/// One billed line on an invoice.
///
/// `due_now_amount` is normally derived from `total_value` and
/// `due_now_percent`, but it is an input in its own right: a value typed
/// directly into it overrides the derived one until either operand changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_sac: Option<String>,
    #[serde(default)]
    pub total_value: NumericField,
    #[serde(default)]
    pub due_now_percent: NumericField,
    #[serde(default)]
    pub due_now_amount: NumericField,
}

impl LineItem {
    /// The row appended by "Add Item": nothing billed yet, 100% due now.
    pub fn blank() -> Self {
        Self {
            description: String::new(),
            hsn_sac: None,
            total_value: NumericField::Value(Decimal::ZERO),
            due_now_percent: NumericField::Value(Decimal::ONE_HUNDRED),
            due_now_amount: NumericField::Value(Decimal::ZERO),
        }
    }

    /// Builds an item whose due-now amount is derived from its operands.
    pub fn with_value(
        description: impl Into<String>,
        hsn_sac: Option<&str>,
        total_value: Decimal,
        due_now_percent: Decimal,
    ) -> Self {
        let mut item = Self {
            description: description.into(),
            hsn_sac: hsn_sac.map(str::to_string),
            total_value: total_value.into(),
            due_now_percent: due_now_percent.into(),
            due_now_amount: NumericField::Empty,
        };
        item.rederive_due_now();
        item
    }

    /// Recomputes `due_now_amount` from the two operands.
    ///
    /// Leaves the stored amount untouched (and returns `false`) when either
    /// operand is not a valid number.
    pub fn rederive_due_now(&mut self) -> bool {
        match due_now_amount(&self.total_value, &self.due_now_percent) {
            Some(amount) => {
                self.due_now_amount = NumericField::Value(amount);
                true
            }
            None => false,
        }
    }

    /// The amount this item contributes to the subtotal.
    pub fn contribution(&self) -> Decimal {
        self.due_now_amount.or_zero()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn blank_item_is_fully_due_with_zero_value() {
        let item = LineItem::blank();

        assert_eq!(item.total_value.value(), Some(dec!(0)));
        assert_eq!(item.due_now_percent.value(), Some(dec!(100)));
        assert_eq!(item.contribution(), Decimal::ZERO);
    }

    #[test]
    fn with_value_derives_due_now_amount() {
        let item = LineItem::with_value("Towards Contractual Works", Some("995464"), dec!(1266838), dec!(50));

        assert_eq!(item.due_now_amount.value(), Some(dec!(633419)));
        assert_eq!(item.hsn_sac.as_deref(), Some("995464"));
    }

    #[test]
    fn rederive_skips_when_operand_is_invalid() {
        let mut item = LineItem::with_value("Cabling", None, dec!(2000), dec!(100));
        item.due_now_percent = NumericField::parse("half");

        assert!(!item.rederive_due_now());
        assert_eq!(item.due_now_amount.value(), Some(dec!(2000)));
    }

    #[test]
    fn missing_due_now_amount_contributes_zero() {
        let item = LineItem {
            description: "Site survey".to_string(),
            ..LineItem::default()
        };

        assert_eq!(item.contribution(), Decimal::ZERO);
    }
}
