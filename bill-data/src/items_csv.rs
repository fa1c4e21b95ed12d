//! CSV import for invoice line items.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Names are
//! case-sensitive.
//!
//! | Column            | Required | Type    | Notes                                       |
//! |-------------------|----------|---------|---------------------------------------------|
//! | `description`     | yes      | string  | Must not be blank                           |
//! | `hsn_sac`         | no       | string  | Leave empty for none                        |
//! | `total_value`     | no       | decimal | Indian grouping allowed when quoted         |
//! | `due_now_percent` | no       | decimal | e.g. `50`                                   |
//! | `due_now_amount`  | no       | decimal | Derived from the two above when left empty  |
//!
//! Numeric cells are read the way the form reads typed text: an empty cell is
//! left empty and a non-numeric one is kept as entered (it counts as zero in
//! totals and is reported by validation).
//!
//! ```csv
//! description,hsn_sac,total_value,due_now_percent,due_now_amount
//! Towards Contractual Works,995464,"12,66,838",100,
//! Retention release,,,,2500.50
//! ```
use bill_core::{LineItem, NumericField};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// Raw row, one field per column
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    description: String,
    #[serde(default)]
    hsn_sac: String,
    #[serde(default)]
    total_value: String,
    #[serde(default)]
    due_now_percent: String,
    #[serde(default)]
    due_now_amount: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while importing line items.
#[derive(Debug, thiserror::Error)]
pub enum ItemCsvError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid or lacks the `description` column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row has a blank description. `row` is 1-based, not counting the
    /// header.
    #[error("item on row {row} has no description")]
    MissingDescription { row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LineItem, ItemCsvError> {
    if row.description.is_empty() {
        return Err(ItemCsvError::MissingDescription { row: row_number });
    }

    let mut item = LineItem {
        description: row.description,
        hsn_sac: (!row.hsn_sac.is_empty()).then_some(row.hsn_sac),
        total_value: NumericField::parse(&row.total_value),
        due_now_percent: NumericField::parse(&row.due_now_percent),
        due_now_amount: NumericField::parse(&row.due_now_amount),
    };
    if item.due_now_amount.is_empty() {
        item.rederive_due_now();
    }
    Ok(item)
}

/// Parses CSV text into line items, in file order.
///
/// # Errors
///
/// * [`ItemCsvError::Parse`] if the CSV is malformed or has no
///   `description` column.
/// * [`ItemCsvError::MissingDescription`] for the first row whose
///   description is blank.
pub fn load_from_str(input: &str) -> Result<Vec<LineItem>, ItemCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let items = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = items.len(), "imported line items");
    Ok(items)
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<LineItem>, ItemCsvError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ItemCsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
