//! Personal finance tracker core: imports spreadsheet files of bank
//! transactions, normalizes multilingual column headers, coerces
//! heterogeneous date/time/amount cells into canonical records, and offers
//! filtering, sorting, grouping, summaries, and CSV export over the result.
//!
//! The pipeline never fails with an `Err` for data problems: `parse_workbook`
//! always returns a [`models::ParseResult`] whose `errors`/`warnings` carry
//! the diagnostics, and [`validator::validate_transactions`] produces an
//! advisory [`models::ValidationSummary`] over any list.
//!
//! ```
//! use kasa::analytics::{calculate_summary, filter_transactions};
//! use kasa::models::Filters;
//!
//! let transactions = kasa::importer::parse_workbook(&[]).transactions;
//! let filtered = filter_transactions(&transactions, &Filters::default());
//! let summary = calculate_summary(&filtered);
//! assert_eq!(summary.total_transactions, 0);
//! ```

pub mod analytics;
pub mod cells;
pub mod error;
pub mod fmt;
pub mod headers;
pub mod importer;
pub mod models;
pub mod store;
pub mod validator;

pub use error::{KasaError, Result};
pub use models::{
    CellValue, Filters, GroupedTransactions, ParseResult, SortOrder, Summary, Transaction,
    ValidationSummary,
};
