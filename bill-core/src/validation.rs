//! Checks run before an invoice is saved or printed.
//!
//! The totals engine never rejects input; these rules only decide whether a
//! finished invoice is complete enough to issue. All failures are collected
//! rather than stopping at the first.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Invoice, LineItem, NumericField};

/// A reason an invoice cannot be saved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvoiceValidationError {
    /// A required text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The invoice has no line items.
    #[error("at least one item is required")]
    NoItems,

    /// A line item has no description. `item` is 1-based.
    #[error("item {item}: description is required")]
    MissingItemDescription { item: usize },

    /// A numeric field holds text that is not a number.
    #[error("{field} must be a number, got '{raw}'")]
    NotANumber { field: String, raw: String },

    /// A percentage is outside 0–100.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: String, value: Decimal },

    /// An amount is below zero.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: Decimal },

    /// The subtotal is zero or negative.
    #[error("amount must be greater than 0, got {0}")]
    NonPositiveAmount(Decimal),
}

/// Validates `invoice`, returning every problem found.
///
/// Empty numeric fields count as zero, the same as in the totals engine;
/// unparseable ones are reported.
///
/// # Example
///
/// ```
/// use bill_core::{Invoice, validate_invoice, InvoiceValidationError};
///
/// let errors = validate_invoice(&Invoice::default()).unwrap_err();
///
/// assert!(errors.contains(&InvoiceValidationError::MissingField("bill_no")));
/// assert!(errors.contains(&InvoiceValidationError::NoItems));
/// ```
pub fn validate_invoice(invoice: &Invoice) -> Result<(), Vec<InvoiceValidationError>> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("bill_no", &invoice.bill_no),
        ("date", &invoice.date),
        ("bill_to", &invoice.bill_to),
        ("ship_to", &invoice.ship_to),
    ] {
        if value.trim().is_empty() {
            errors.push(InvoiceValidationError::MissingField(name));
        }
    }

    if invoice.items.is_empty() {
        errors.push(InvoiceValidationError::NoItems);
    }
    for (idx, item) in invoice.items.iter().enumerate() {
        validate_item(idx + 1, item, &mut errors);
    }

    if let Some(amount) = number("amount", &invoice.amount, &mut errors)
        && amount <= Decimal::ZERO
    {
        errors.push(InvoiceValidationError::NonPositiveAmount(amount));
    }
    percent("cgst_percent", &invoice.cgst_percent, &mut errors);
    percent("sgst_percent", &invoice.sgst_percent, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_item(
    item_number: usize,
    item: &LineItem,
    errors: &mut Vec<InvoiceValidationError>,
) {
    if item.description.trim().is_empty() {
        errors.push(InvoiceValidationError::MissingItemDescription { item: item_number });
    }
    non_negative(
        &format!("item {item_number} total_value"),
        &item.total_value,
        errors,
    );
    percent(
        &format!("item {item_number} due_now_percent"),
        &item.due_now_percent,
        errors,
    );
    non_negative(
        &format!("item {item_number} due_now_amount"),
        &item.due_now_amount,
        errors,
    );
}

/// The field's value (empty counts as zero), or `None` after recording why not.
fn number(
    field: &str,
    value: &NumericField,
    errors: &mut Vec<InvoiceValidationError>,
) -> Option<Decimal> {
    match value {
        NumericField::Invalid(raw) => {
            errors.push(InvoiceValidationError::NotANumber {
                field: field.to_string(),
                raw: raw.clone(),
            });
            None
        }
        other => Some(other.or_zero()),
    }
}

fn non_negative(
    field: &str,
    value: &NumericField,
    errors: &mut Vec<InvoiceValidationError>,
) {
    if let Some(value) = number(field, value, errors)
        && value < Decimal::ZERO
    {
        errors.push(InvoiceValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }
}

fn percent(
    field: &str,
    value: &NumericField,
    errors: &mut Vec<InvoiceValidationError>,
) {
    if let Some(value) = number(field, value, errors)
        && (value < Decimal::ZERO || value > Decimal::ONE_HUNDRED)
    {
        errors.push(InvoiceValidationError::PercentOutOfRange {
            field: field.to_string(),
            value,
        });
    }
}
