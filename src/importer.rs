use std::io::Cursor;

use calamine::{Data, Reader};
use chrono::{NaiveDateTime, Utc};

use crate::cells::{excel_serial_to_datetime, parse_cost, parse_date_time};
use crate::headers::{duplicate_headers, normalize_headers};
use crate::models::{CellValue, ParseResult, Transaction};

const REQUIRED_FIELDS: &[&str] = &["date", "store", "purchase", "cost"];

static EMPTY_CELL: CellValue = CellValue::Empty;

fn error_result(message: String) -> ParseResult {
    ParseResult {
        transactions: Vec::new(),
        errors: vec![message],
        warnings: Vec::new(),
    }
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            if serial < 1.0 {
                // Time-of-day serial; keep the fraction for the coercer.
                CellValue::Number(serial)
            } else {
                match excel_serial_to_datetime(serial) {
                    Some(ndt) => CellValue::DateTime(ndt),
                    None => CellValue::Empty,
                }
            }
        }
        Data::DateTimeIso(s) => match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            Ok(ndt) => CellValue::DateTime(ndt),
            Err(_) => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn cell_at<'a>(row: &'a [CellValue], index: Option<&usize>) -> &'a CellValue {
    index.and_then(|i| row.get(*i)).unwrap_or(&EMPTY_CELL)
}

/// Decode a binary workbook and run the row pipeline. Prefers a sheet
/// whose name contains "transaction", else takes the first sheet. All
/// failure modes come back inside the `ParseResult`, never as an `Err`.
pub fn parse_workbook(bytes: &[u8]) -> ParseResult {
    let mut workbook = match calamine::open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(workbook) => workbook,
        Err(e) => return error_result(format!("Failed to parse file: {e}")),
    };

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .iter()
        .find(|name| name.to_lowercase().contains("transaction"))
        .or_else(|| sheet_names.first())
        .cloned();
    let Some(sheet_name) = sheet_name else {
        return error_result("Empty spreadsheet".to_string());
    };

    let range = match workbook.worksheet_range(&sheet_name) {
        Ok(range) => range,
        Err(e) => return error_result(format!("Failed to parse file: {e}")),
    };

    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    parse_rows(&rows)
}

/// The synchronous row loop: header normalization, required-column check,
/// then per-row coercion with partial-failure isolation. Rows are numbered
/// from 2 to account for the header row.
pub fn parse_rows(rows: &[Vec<CellValue>]) -> ParseResult {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return error_result("Empty spreadsheet".to_string());
    };

    let header_map = normalize_headers(header_row);
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !header_map.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return error_result(format!("Missing required columns: {}", missing.join(", ")));
    }

    let mut result = ParseResult::default();
    for name in duplicate_headers(header_row) {
        result
            .warnings
            .push(format!("Duplicate column: {name} (keeping the last occurrence)"));
    }

    // One timestamp per batch; the row number makes each id unique.
    let batch = Utc::now().timestamp_millis();

    for (index, row) in data_rows.iter().enumerate() {
        let row_number = index + 2;

        if row.iter().all(CellValue::is_blank) {
            continue;
        }

        let date_value = cell_at(row, header_map.get("date"));
        let time_value = cell_at(row, header_map.get("time"));
        let store = cell_at(row, header_map.get("store"));
        let purchase = cell_at(row, header_map.get("purchase"));
        let cost_value = cell_at(row, header_map.get("cost"));

        // Missing data is tolerated as a warning-and-skip, not an error.
        // A zero cost cell still counts as present.
        if date_value.is_blank()
            || store.is_blank()
            || purchase.is_blank()
            || matches!(cost_value, CellValue::Empty)
        {
            result
                .warnings
                .push(format!("Row {row_number}: Missing required data"));
            continue;
        }

        let Some(date) = parse_date_time(date_value, time_value) else {
            result
                .errors
                .push(format!("Row {row_number}: Could not parse date"));
            continue;
        };

        let cost = parse_cost(cost_value);

        result.transactions.push(Transaction {
            id: format!("{row_number}-{batch}"),
            date,
            time: if time_value.is_blank() {
                String::new()
            } else {
                time_value.to_display_string()
            },
            store: store.to_display_string().trim().to_string(),
            purchase: purchase.to_display_string().trim().to_string(),
            cost,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn header_row() -> Vec<CellValue> {
        vec![text("Date"), text("Time"), text("Store"), text("Purchase"), text("Cost")]
    }

    #[test]
    fn test_well_formed_row_roundtrip() {
        let rows = vec![
            header_row(),
            vec![text("2023-12-01"), text("10:30"), text("АТБ"), text("Продукти"), text("-150.5")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.errors, Vec::<String>::new());
        assert_eq!(result.warnings, Vec::<String>::new());
        assert_eq!(result.transactions.len(), 1);
        let tx = &result.transactions[0];
        assert_eq!(tx.date, "2023-12-01T10:30:00.000Z");
        assert_eq!(tx.time, "10:30");
        assert_eq!(tx.store, "АТБ");
        assert_eq!(tx.purchase, "Продукти");
        assert_eq!(tx.cost, -150.5);
        assert!(tx.id.starts_with("2-"));
    }

    #[test]
    fn test_ukrainian_headers_map() {
        let rows = vec![
            vec![text("Дата"), text("Час"), text("Магазин"), text("Покупка"), text("Сума")],
            vec![text("01.12.2023"), CellValue::Empty, text("Сільпо"), text("Хліб"), CellValue::Number(-25.0)],
        ];
        let result = parse_rows(&rows);
        assert!(result.errors.is_empty());
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].date, "2023-12-01T00:00:00.000Z");
        assert_eq!(result.transactions[0].time, "");
        assert_eq!(result.transactions[0].cost, -25.0);
    }

    #[test]
    fn test_missing_required_columns_abort() {
        let rows = vec![
            vec![text("Date"), text("Store"), text("Purchase")],
            vec![text("2023-12-01"), text("АТБ"), text("Продукти")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.transactions, Vec::new());
        assert_eq!(result.errors, vec!["Missing required columns: cost".to_string()]);
        assert_eq!(result.warnings, Vec::<String>::new());
    }

    #[test]
    fn test_missing_columns_listed_together() {
        let rows = vec![vec![text("Time"), text("Note")]];
        let result = parse_rows(&rows);
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert!(error.starts_with("Missing required columns: "));
        for field in ["date", "store", "purchase", "cost"] {
            assert!(error.contains(field), "{error} should name {field}");
        }
    }

    #[test]
    fn test_empty_sheet() {
        let result = parse_rows(&[]);
        assert_eq!(result.errors, vec!["Empty spreadsheet".to_string()]);
        assert!(result.transactions.is_empty());
    }

    #[test]
    fn test_bad_row_does_not_block_the_rest() {
        let rows = vec![
            header_row(),
            vec![text("2023-12-01"), text("10:30"), text("АТБ"), text("Продукти"), text("-150.5")],
            vec![text("soon"), text("10:30"), text("Розетка"), text("Кабель"), text("-200")],
            vec![text("2023-12-02"), text("12:00"), text("Каса"), text("Зарплата"), text("15000")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.errors, vec!["Row 3: Could not parse date".to_string()]);
        assert_eq!(result.transactions[0].store, "АТБ");
        assert_eq!(result.transactions[1].store, "Каса");
    }

    #[test]
    fn test_absurd_numeric_date_is_row_error() {
        // An out-of-range serial must come back as a row diagnostic, never
        // a panic out of the coercer.
        let rows = vec![
            header_row(),
            vec![CellValue::Number(1e30), text(""), text("АТБ"), text("Продукти"), text("-150.5")],
            vec![text("2023-12-01"), text(""), text("АТБ"), text("Продукти"), text("-150.5")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.errors, vec!["Row 2: Could not parse date".to_string()]);
        assert_eq!(result.transactions.len(), 1);
    }

    #[test]
    fn test_blank_rows_skipped_silently() {
        let rows = vec![
            header_row(),
            vec![CellValue::Empty, CellValue::Empty, text(""), CellValue::Number(0.0), CellValue::Empty],
            vec![text("2023-12-01"), text("10:30"), text("АТБ"), text("Продукти"), text("-150.5")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.transactions.len(), 1);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_partial_row_warns_and_skips() {
        let rows = vec![
            header_row(),
            vec![text("2023-12-01"), text(""), text(""), text("Продукти"), text("-150.5")],
        ];
        let result = parse_rows(&rows);
        assert!(result.transactions.is_empty());
        assert_eq!(result.warnings, vec!["Row 2: Missing required data".to_string()]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_zero_cost_cell_still_counts_as_present() {
        let rows = vec![
            header_row(),
            vec![text("2023-12-01"), text(""), text("АТБ"), text("Продукти"), CellValue::Number(0.0)],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].cost, 0.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_short_row_is_missing_data() {
        let rows = vec![
            header_row(),
            vec![text("2023-12-01"), text("10:30"), text("АТБ")],
        ];
        let result = parse_rows(&rows);
        assert!(result.transactions.is_empty());
        assert_eq!(result.warnings, vec!["Row 2: Missing required data".to_string()]);
    }

    #[test]
    fn test_serial_date_and_time_cells() {
        let rows = vec![
            header_row(),
            vec![
                CellValue::Number(45261.0),
                CellValue::Number(0.4375),
                text("АТБ"),
                text("Продукти"),
                CellValue::Number(-150.5),
            ],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].date, "2023-12-01T10:30:00.000Z");
        assert_eq!(result.transactions[0].time, "0.4375");
    }

    #[test]
    fn test_duplicate_column_warning() {
        let rows = vec![
            vec![text("Date"), text("Amount"), text("Store"), text("Purchase"), text("Cost")],
            vec![text("2023-12-01"), text("-1"), text("АТБ"), text("Продукти"), text("-150.5")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(
            result.warnings,
            vec!["Duplicate column: cost (keeping the last occurrence)".to_string()]
        );
        // Last column wins.
        assert_eq!(result.transactions[0].cost, -150.5);
    }

    #[test]
    fn test_ids_are_unique_within_batch() {
        let rows = vec![
            header_row(),
            vec![text("2023-12-01"), text(""), text("А"), text("а"), text("-1")],
            vec![text("2023-12-02"), text(""), text("Б"), text("б"), text("-2")],
        ];
        let result = parse_rows(&rows);
        assert_eq!(result.transactions.len(), 2);
        assert_ne!(result.transactions[0].id, result.transactions[1].id);
    }

    #[test]
    fn test_undecodable_bytes() {
        let result = parse_workbook(b"definitely not a workbook");
        assert!(result.transactions.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Failed to parse file: "));
        assert!(result.warnings.is_empty());
    }
}
