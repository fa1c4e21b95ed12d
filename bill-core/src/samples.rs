//! Form defaults and the sample "recent bills" list.
//!
//! A recent bill only records its grand total, so loading one back into the
//! form reverses the standard 18% GST (9% CGST + 9% SGST) to recover a
//! subtotal and rebuilds a single line item from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{Invoice, Issuer, LineItem, NumericField, RecentBill};

/// `1 + 18%`: divides a GST-inclusive total back to its taxable subtotal.
pub const STANDARD_GST_DIVISOR: Decimal = Decimal::from_parts(118, 0, 0, false, 2);

/// CGST and SGST rate each, in percent.
pub const STANDARD_HALF_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

const DEFAULT_ADDRESS: &str = "Amba Switchgears\nLand No- 152, Junction road\nIndustrial area, UP- 203131";

/// The issuer printed on new invoices.
pub fn default_issuer() -> Issuer {
    Issuer {
        company_name: Some("UNARCH & BUILD".to_string()),
        company_address: Some(
            "104, OC-07, Orange County Amisha\nKhand-1, Ghaziabad, UP-201014".to_string(),
        ),
        company_gstin: Some("09DWTPS 5635F1ZV".to_string()),
        company_state: Some("Uttar Pradesh, Code : 09".to_string()),
        company_email: Some("amitsainii@gmail.com".to_string()),
    }
}

/// The invoice a fresh form starts from, dated `today`.
pub fn default_invoice(today: NaiveDate) -> Invoice {
    let subtotal = Decimal::from(1_266_838);

    Invoice {
        issuer: default_issuer(),
        bill_no: "URSS-24/021".to_string(),
        date: today.format("%Y-%m-%d").to_string(),
        bill_to: DEFAULT_ADDRESS.to_string(),
        ship_to: DEFAULT_ADDRESS.to_string(),
        place_of_supply: Some("U P".to_string()),
        state_code: Some("09".to_string()),
        gstin: Some("09ABZFA98281Z0".to_string()),
        work_order_no: None,
        items: vec![LineItem::with_value(
            "Towards Contractual Works",
            Some("995464"),
            subtotal,
            Decimal::ONE_HUNDRED,
        )],
        invoice_description: Some("Towards Contractual Works".to_string()),
        amount: subtotal.into(),
        cgst_percent: STANDARD_HALF_RATE.into(),
        sgst_percent: STANDARD_HALF_RATE.into(),
        totals: Default::default(),
    }
}

/// Previously issued bills offered for loading.
pub fn recent_bills() -> Vec<RecentBill> {
    vec![
        RecentBill {
            bill_no: "INV-1023".to_string(),
            date: "2023-10-25".to_string(),
            total_amount: Decimal::new(145_486_800, 2),
            bill_to: "Amba Switchgears".to_string(),
        },
        RecentBill {
            bill_no: "INV-1022".to_string(),
            date: "2023-10-20".to_string(),
            total_amount: Decimal::from(590),
            bill_to: "Innovate LLC".to_string(),
        },
        RecentBill {
            bill_no: "INV-1021".to_string(),
            date: "2023-10-15".to_string(),
            total_amount: Decimal::from(2360),
            bill_to: "Solutions Inc".to_string(),
        },
    ]
}

/// Looks up a recent bill by number (case-insensitive).
pub fn find_recent_bill(bill_no: &str) -> Option<RecentBill> {
    recent_bills()
        .into_iter()
        .find(|bill| bill.bill_no.eq_ignore_ascii_case(bill_no.trim()))
}

/// Subtotal that produces `total` at the standard 18% GST.
pub fn subtotal_before_gst(total: Decimal) -> Decimal {
    total.checked_div(STANDARD_GST_DIVISOR).unwrap_or_else(|| {
        warn!(%total, "cannot back out GST; using zero subtotal");
        Decimal::ZERO
    })
}

/// Overwrites the form with a recent bill, keeping fields it does not carry.
///
/// Sets bill number, date and bill-to, replaces the items with one
/// "Loaded Item" worth the recovered subtotal, and resets both GST rates to
/// 9%.
pub fn apply_recent_bill(
    invoice: &mut Invoice,
    bill: &RecentBill,
) {
    let subtotal = subtotal_before_gst(bill.total_amount);

    invoice.bill_no = bill.bill_no.clone();
    invoice.date = bill.date.clone();
    invoice.bill_to = bill.bill_to.clone();
    invoice.amount = subtotal.into();
    invoice.items = vec![LineItem {
        description: "Loaded Item".to_string(),
        hsn_sac: None,
        total_value: subtotal.into(),
        due_now_percent: NumericField::Value(Decimal::ONE_HUNDRED),
        due_now_amount: subtotal.into(),
    }];
    invoice.cgst_percent = STANDARD_HALF_RATE.into();
    invoice.sgst_percent = STANDARD_HALF_RATE.into();
}
