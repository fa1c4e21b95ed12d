//! Core logic for GST invoices: amounts in words, derived totals and the
//! entry form's state transitions. No I/O.

pub mod calculations;
pub mod format;
pub mod models;
pub mod samples;
pub mod state;
pub mod validation;

pub use calculations::{Totals, number_to_words, recompute_totals};
pub use models::*;
pub use state::{InvoiceEvent, InvoiceForm, ItemTextField, TextField};
pub use validation::{InvoiceValidationError, validate_invoice};
