use serde::{Deserialize, Serialize};

use super::{LineItem, NumericField};
use crate::calculations::totals::Totals;

/// The issuing company as printed in the invoice header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_gstin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
}

/// A GST tax invoice ("bill") as held by the entry form.
///
/// Everything except `totals` is user input. `totals` is recomputed from
/// `amount`, the two percentages and (on item-list changes) the items; it is
/// written out when serializing but never read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(flatten)]
    pub issuer: Issuer,

    // Recipient
    #[serde(default)]
    pub bill_no: String,
    /// ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub bill_to: String,
    #[serde(default)]
    pub ship_to: String,

    // Routing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_supply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_order_no: Option<String>,

    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_description: Option<String>,

    /// Taxable subtotal.
    #[serde(default)]
    pub amount: NumericField,
    #[serde(default)]
    pub cgst_percent: NumericField,
    #[serde(default)]
    pub sgst_percent: NumericField,

    #[serde(default, skip_deserializing)]
    pub totals: Totals,
}

impl Invoice {
    /// First line of the bill-to address, used as the customer's short name.
    pub fn customer_name(&self) -> &str {
        self.bill_to.lines().next().unwrap_or_default().trim()
    }
}
