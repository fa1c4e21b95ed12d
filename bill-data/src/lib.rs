//! File formats for BillSwift: TOML invoice documents, CSV line-item import
//! and CSV export of the recent-bills list.

pub mod document;
pub mod items_csv;
pub mod recent_csv;

pub use document::{DocumentError, load_invoice_from_file, load_invoice_from_str};
pub use items_csv::ItemCsvError;
pub use recent_csv::{read_recent_bills, write_recent_bills};
