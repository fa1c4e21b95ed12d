use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary of a previously issued bill, offered for loading into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentBill {
    pub bill_no: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    /// Grand total including CGST and SGST.
    pub total_amount: Decimal,
    pub bill_to: String,
}
