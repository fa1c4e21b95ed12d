//! CSV exchange for the recent-bills list.
//!
//! Columns are `bill_no,date,total_amount,bill_to`, one bill per row. Amounts
//! are written exactly as stored, without grouping.

use std::io::{Read, Write};

use bill_core::RecentBill;
use tracing::debug;

/// Writes `bills` with a header row, in the order given.
pub fn write_recent_bills<W: Write>(
    writer: W,
    bills: &[RecentBill],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for bill in bills {
        writer.serialize(bill)?;
    }
    writer.flush()?;

    debug!(count = bills.len(), "exported recent bills");
    Ok(())
}

/// Reads bills written by [`write_recent_bills`] (or by hand, in any column
/// order).
pub fn read_recent_bills<R: Read>(reader: R) -> Result<Vec<RecentBill>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader.deserialize().collect()
}

#[cfg(test)]
mod tests {
    use bill_core::samples::recent_bills;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn export(bills: &[RecentBill]) -> String {
        let mut out = Vec::new();
        write_recent_bills(&mut out, bills).expect("write to Vec cannot fail");
        String::from_utf8(out).expect("csv output is UTF-8")
    }

    #[test]
    fn sample_bills_export_with_header() {
        let text = export(&recent_bills());

        assert_eq!(
            text,
            "bill_no,date,total_amount,bill_to\n\
             INV-1023,2023-10-25,1454868.00,Amba Switchgears\n\
             INV-1022,2023-10-20,590,Innovate LLC\n\
             INV-1021,2023-10-15,2360,Solutions Inc\n"
        );
    }

    #[test]
    fn empty_list_writes_nothing() {
        // csv only emits the header alongside the first record
        assert_eq!(export(&[]), "");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let bill = RecentBill {
            bill_no: "INV-7".to_string(),
            date: "2024-01-05".to_string(),
            total_amount: dec!(118),
            bill_to: "Sharma, Sons & Co".to_string(),
        };

        assert!(export(&[bill]).contains("\"Sharma, Sons & Co\""));
    }

    #[test]
    fn read_accepts_exported_text() {
        let text = export(&recent_bills());

        let bills = read_recent_bills(text.as_bytes()).expect("should parse");

        assert_eq!(bills, recent_bills());
    }

    #[test]
    fn read_rejects_non_numeric_total() {
        let text = "bill_no,date,total_amount,bill_to\nINV-1,2024-01-01,lots,Acme\n";

        assert!(read_recent_bills(text.as_bytes()).is_err());
    }
}
