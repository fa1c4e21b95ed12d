//! Plain-text rendering of the printed tax invoice.
//!
//! The layout follows the paper form: issuer header, recipient blocks, the
//! item table padded to five rows, the GST summary with amounts in words,
//! the declaration and the bank footer.

use std::fmt;

use bill_core::format::{format_inr, format_invoice_date, format_percent};
use bill_core::{Invoice, NumericField};

use crate::config::BankDetails;

const WIDTH: usize = 78;
const MIN_TABLE_ROWS: usize = 5;

/// Renders an invoice whose totals are already derived.
///
/// ```no_run
/// # use bill_cli::{config::AppConfig, preview::InvoicePreview};
/// # let invoice = bill_core::Invoice::default();
/// let config = AppConfig::default();
/// println!("{}", InvoicePreview::new(&invoice, &config.bank, config.merchant_name()));
/// ```
pub struct InvoicePreview<'a> {
    invoice: &'a Invoice,
    bank: &'a BankDetails,
    merchant_name: &'a str,
}

impl<'a> InvoicePreview<'a> {
    pub fn new(
        invoice: &'a Invoice,
        bank: &'a BankDetails,
        merchant_name: &'a str,
    ) -> Self {
        Self {
            invoice,
            bank,
            merchant_name,
        }
    }

    fn header(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let issuer = &self.invoice.issuer;

        writeln!(f, "{}", issuer.company_name.as_deref().unwrap_or_default())?;
        for line in issuer.company_address.as_deref().unwrap_or_default().lines() {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "GSTIN: {}", issuer.company_gstin.as_deref().unwrap_or_default())?;
        writeln!(f, "State: {}", issuer.company_state.as_deref().unwrap_or_default())?;
        if let Some(email) = &issuer.company_email {
            writeln!(f, "{email}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:^WIDTH$}", "TAX INVOICE")?;
        writeln!(f)
    }

    fn parties(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let invoice = self.invoice;

        writeln!(f, "Bill To")?;
        for line in invoice.bill_to.lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "  GSTIN: {}", invoice.gstin.as_deref().unwrap_or("N/A"))?;
        if let Some(work_order) = &invoice.work_order_no {
            writeln!(f, "  Work Order: {work_order}")?;
        }

        writeln!(f, "Ship To")?;
        for line in invoice.ship_to.lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f)?;

        writeln!(f, "{:<16}: {}", "Invoice No.", invoice.bill_no)?;
        writeln!(f, "{:<16}: {}", "Date", format_invoice_date(&invoice.date))?;
        writeln!(
            f,
            "{:<16}: {}",
            "Place of Supply",
            invoice.place_of_supply.as_deref().unwrap_or_default()
        )?;
        writeln!(
            f,
            "{:<16}: {}",
            "State Code",
            invoice.state_code.as_deref().unwrap_or_default()
        )?;
        writeln!(f)
    }

    fn items(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let rule = "-".repeat(WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:>3}  {:<25} {:<8} {:>14} {:>8} {:>14}",
            "Sl.", "Item Details", "HSN/SAC", "Total Value", "Due %", "Due Amount"
        )?;
        writeln!(f, "{rule}")?;

        for (idx, item) in self.invoice.items.iter().enumerate() {
            let mut lines = item.description.lines();
            writeln!(
                f,
                "{:>3}  {:<25} {:<8} {:>14} {:>8} {:>14}",
                idx + 1,
                lines.next().unwrap_or_default(),
                item.hsn_sac.as_deref().unwrap_or_default(),
                amount_cell(&item.total_value),
                percent_cell(&item.due_now_percent),
                amount_cell(&item.due_now_amount),
            )?;
            for continuation in lines {
                writeln!(f, "{:>3}  {continuation}", "")?;
            }
        }
        for _ in self.invoice.items.len()..MIN_TABLE_ROWS {
            writeln!(f)?;
        }

        writeln!(f, "{rule}")
    }

    fn summary(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let invoice = self.invoice;
        let totals = &invoice.totals;

        summary_line(f, "SUB TOTAL", &format_inr(totals.amount))?;
        summary_line(
            f,
            &format!("CGST @ {} %", format_percent(invoice.cgst_percent.or_zero())),
            &format_inr(totals.cgst_amount),
        )?;
        summary_line(
            f,
            &format!("SGST @ {} %", format_percent(invoice.sgst_percent.or_zero())),
            &format_inr(totals.sgst_amount),
        )?;
        summary_line(f, "TOTAL", &format!("₹ {}", format_inr(totals.total_amount)))?;
        writeln!(f)?;

        writeln!(f, "Tax Amount: {}", totals.tax_amount_in_words)?;
        writeln!(f, "Total Amount: {}", totals.total_amount_in_words)?;
        writeln!(f)
    }

    fn footer(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let invoice = self.invoice;
        let company = invoice.issuer.company_name.as_deref().unwrap_or_default();

        writeln!(
            f,
            "Invoice Description: {}",
            invoice.invoice_description.as_deref().unwrap_or_default()
        )?;
        writeln!(f, "We declare that this invoice shows the actual price of the goods")?;
        writeln!(f, "described and that all particulars are true and correct.")?;
        writeln!(f)?;
        writeln!(f, "{:>WIDTH$}", format!("For {company}"))?;
        writeln!(f)?;
        writeln!(f, "{:>WIDTH$}", "Authorized Signatory")?;
        writeln!(f)?;
        writeln!(f, "{:^WIDTH$}", "This is a computer generated invoice")?;
        writeln!(f)?;

        let bank = self.bank;
        writeln!(f, "Payment can be done using IMPS, NEFT, or RTGS to the account details below:")?;
        writeln!(f, "{:<15}: {}", "Bank Name", bank.bank_name)?;
        writeln!(f, "{:<15}: {}", "Merchant Name", self.merchant_name)?;
        writeln!(f, "{:<15}: {}", "Account Number", bank.account_number)?;
        write!(f, "{:<15}: {}", "IFSC Code", bank.ifsc)
    }
}

impl fmt::Display for InvoicePreview<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.header(f)?;
        self.parties(f)?;
        self.items(f)?;
        self.summary(f)?;
        self.footer(f)
    }
}

fn summary_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "{label:>58}{value:>20}")
}

/// Empty cells print as zero; text that is not a number prints as entered.
fn amount_cell(field: &NumericField) -> String {
    match field {
        NumericField::Invalid(raw) => raw.clone(),
        other => format_inr(other.or_zero()),
    }
}

fn percent_cell(field: &NumericField) -> String {
    match field {
        NumericField::Invalid(raw) => raw.clone(),
        other => format!("{}%", format_percent(other.or_zero())),
    }
}
