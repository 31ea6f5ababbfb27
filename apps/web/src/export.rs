//! # Revenue Export
//!
//! Serializes a daily revenue report into an xlsx workbook, entirely in
//! memory. Pure transformation: nothing here touches the store.
//!
//! ## Workbook Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sheet "2026-08-06"                                                     │
//! │                                                                         │
//! │  │ id │ timestamp           │ product_name │ value │ kind   │           │
//! │  │  1 │ 2026-08-06 09:12:40 │ Água 500ml   │  2.50 │ code   │           │
//! │  │  2 │ 2026-08-06 14:30:05 │ Revista      │ 12.00 │ manual │           │
//! │                                                                         │
//! │  Columns follow the record's display order; one row per sale.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, XlsxError};

use banca_core::DailyReport;

/// MIME type for the modern spreadsheet format.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column headers, in display order.
const HEADERS: [&str; 5] = ["id", "timestamp", "product_name", "value", "kind"];

/// Download filename for a day's export: `faturamento_<YYYY-MM-DD>.xlsx`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("faturamento_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Builds the xlsx workbook for a daily report and returns its bytes.
///
/// One sheet, named for the reporting period; a header row followed by one
/// row per record in the report's (insertion) order. An empty day still
/// produces a valid workbook with just the header row.
pub fn daily_workbook(report: &DailyReport) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(report.date.format("%Y-%m-%d").to_string())?;

    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }

    for (i, record) in report.records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, record.id as f64)?;
        sheet.write_string(row, 1, record.timestamp())?;
        sheet.write_string(row, 2, record.product_name.as_str())?;
        sheet.write_number(row, 3, record.value.as_value())?;
        sheet.write_string(row, 4, record.kind.as_str())?;
    }

    workbook.save_to_buffer()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use banca_core::{Money, SaleKind, SaleRecord};
    use chrono::NaiveDate;

    fn sample_report() -> DailyReport {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let recorded_at = date.and_hms_opt(9, 12, 40).unwrap();
        DailyReport {
            date,
            total: Money::from_cents(250),
            records: vec![SaleRecord {
                id: 1,
                recorded_at,
                product_name: "Água 500ml".to_string(),
                value: Money::from_cents(250),
                kind: SaleKind::Code,
            }],
        }
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(export_filename(date), "faturamento_2026-08-06.xlsx");
    }

    #[test]
    fn test_workbook_bytes_look_like_a_zip() {
        let bytes = daily_workbook(&sample_report()).unwrap();

        // xlsx is a zip container: PK magic
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_day_still_produces_a_workbook() {
        let report = DailyReport {
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            total: Money::zero(),
            records: vec![],
        };

        let bytes = daily_workbook(&report).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
