use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single normalized bank transaction. Immutable once created by the
/// importer; derived views clone the values they keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique within one import batch: `<row>-<batch millis>`.
    pub id: String,
    /// Combined timestamp, `yyyy-MM-ddTHH:MM:00.000Z`. Wall-clock values
    /// stamped as UTC, never converted.
    pub date: String,
    /// Time-of-day as it appeared in the spreadsheet (may be empty).
    pub time: String,
    pub store: String,
    pub purchase: String,
    /// Negative = spending, positive = income.
    pub cost: f64,
}

/// Outcome of one import. Errors name rows that were rejected; warnings
/// name anomalies in rows that were skipped leniently or still included.
/// Never an `Err` — a bad file is an empty list plus one explanatory error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Post-hoc quality report over an already-materialized list, distinct
/// from import-time diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Query specification; `None` / empty means no constraint on that axis.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub search_text: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

/// One calendar day's worth of transactions, newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTransactions {
    /// `yyyy-MM-dd` bucket key.
    pub date: String,
    /// Сьогодні / Учора / localized "d MMM yyyy".
    pub display_date: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub balance: f64,
    pub spending: f64,
    pub income: f64,
    pub total_transactions: usize,
}

/// Raw workbook cell content before coercion. A closed union so the cell
/// coercer can match exhaustively instead of sniffing types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Cells the importer treats as absent: empty, zero, or "".
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => *n == 0.0,
            CellValue::Text(s) => s.is_empty(),
            CellValue::DateTime(_) => false,
        }
    }

    /// The raw display form kept in `Transaction::time`.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format!("{n}"),
            CellValue::Text(s) => s.clone(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
