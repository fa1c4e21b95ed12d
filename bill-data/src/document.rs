//! TOML invoice documents.
//!
//! A document holds the form inputs only; derived totals are recomputed after
//! loading and any `totals` table in the file is ignored.
//!
//! ```toml
//! company_name = "UNARCH & BUILD"
//! bill_no = "URSS-24/021"
//! date = "2024-04-01"
//! bill_to = "Amba Switchgears"
//! ship_to = "Amba Switchgears"
//! cgst_percent = 9
//! sgst_percent = 9
//!
//! [[items]]
//! description = "Towards Contractual Works"
//! hsn_sac = "995464"
//! total_value = 1266838
//! due_now_percent = 100
//! ```
//!
//! Numbers may be written as TOML integers, floats or strings (`"12,66,838"`).

use std::path::{Path, PathBuf};

use bill_core::Invoice;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading an invoice document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid invoice document: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parses an invoice document from TOML text.
///
/// Items without a due-now amount get one derived from their total value and
/// due-now percentage, the same as when those fields are typed into the form.
pub fn load_invoice_from_str(input: &str) -> Result<Invoice, DocumentError> {
    let mut invoice: Invoice = toml::from_str(input)?;

    for item in invoice.items.iter_mut().filter(|item| item.due_now_amount.is_empty()) {
        item.rederive_due_now();
    }

    debug!(
        bill_no = %invoice.bill_no,
        items = invoice.items.len(),
        "loaded invoice document"
    );
    Ok(invoice)
}

/// Reads a file from disk and delegates to [`load_invoice_from_str`].
pub fn load_invoice_from_file(path: &Path) -> Result<Invoice, DocumentError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_invoice_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use bill_core::NumericField;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL: &str = r#"
bill_no = "INV-2001"
date = "2024-05-02"
bill_to = "Innovate LLC"
ship_to = "Innovate LLC"
amount = 500
cgst_percent = 9
sgst_percent = 9
"#;

    const WITH_ITEMS: &str = r#"
company_name = "UNARCH & BUILD"
company_gstin = "09DWTPS 5635F1ZV"
bill_no = "URSS-24/021"
date = "2024-04-01"
bill_to = """
Amba Switchgears
Land No- 152, Junction road"""
ship_to = "Amba Switchgears"
gstin = "09ABZFA98281Z0"
cgst_percent = "9"
sgst_percent = 9.0

[[items]]
description = "Towards Contractual Works"
hsn_sac = "995464"
total_value = "12,66,838"
due_now_percent = 50

[[items]]
description = "Retention release"
due_now_amount = 2500.50

[totals]
total_amount = "999"
"#;

    #[test]
    fn minimal_document_has_no_items() {
        let invoice = load_invoice_from_str(MINIMAL).expect("should parse minimal document");

        assert_eq!(invoice.bill_no, "INV-2001");
        assert!(invoice.items.is_empty());
        assert_eq!(invoice.amount, NumericField::Value(dec!(500)));
        assert_eq!(invoice.issuer.company_name, None);
    }

    #[test]
    fn issuer_fields_are_read_from_top_level() {
        let invoice = load_invoice_from_str(WITH_ITEMS).expect("should parse");

        assert_eq!(invoice.issuer.company_name.as_deref(), Some("UNARCH & BUILD"));
        assert_eq!(invoice.issuer.company_gstin.as_deref(), Some("09DWTPS 5635F1ZV"));
        assert_eq!(invoice.customer_name(), "Amba Switchgears");
    }

    #[test]
    fn numbers_accept_strings_integers_and_floats() {
        let invoice = load_invoice_from_str(WITH_ITEMS).expect("should parse");

        assert_eq!(invoice.cgst_percent.value(), Some(dec!(9)));
        assert_eq!(invoice.sgst_percent.value(), Some(dec!(9)));
        assert_eq!(invoice.items[0].total_value.value(), Some(dec!(1266838)));
        assert_eq!(invoice.items[1].due_now_amount.value(), Some(dec!(2500.50)));
    }

    #[test]
    fn missing_due_now_amount_is_derived() {
        let invoice = load_invoice_from_str(WITH_ITEMS).expect("should parse");

        assert_eq!(invoice.items[0].due_now_amount.value(), Some(dec!(633419)));
    }

    #[test]
    fn totals_in_file_are_ignored() {
        let invoice = load_invoice_from_str(WITH_ITEMS).expect("should parse");

        assert_eq!(invoice.totals.total_amount, dec!(0));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = load_invoice_from_str("bill_no = ");

        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_invoice_from_file(Path::new("/this/path/does/not/exist.toml"));

        match result {
            Err(DocumentError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/this/path/does/not/exist.toml"));
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
