pub mod clear;
pub mod export;
pub mod import;
pub mod list;
pub mod status;
pub mod summary;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Location of the persisted transaction list.
pub(crate) fn store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kasa")
        .join("transactions.json")
}

#[derive(Parser)]
#[command(name = "kasa", about = "Personal finance tracker: import bank spreadsheets, analyze, export CSV.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an xlsx/xls/ods file and replace the stored transactions.
    Import {
        /// Path to the spreadsheet file
        file: String,
    },
    /// List stored transactions, grouped by day.
    List {
        /// Case-insensitive text to match against store or purchase
        #[arg(long)]
        search: Option<String>,
        /// Earliest day to include (yyyy-MM-dd)
        #[arg(long)]
        from: Option<String>,
        /// Latest day to include (yyyy-MM-dd)
        #[arg(long)]
        to: Option<String>,
        /// Minimum absolute amount
        #[arg(long)]
        min: Option<f64>,
        /// Maximum absolute amount
        #[arg(long)]
        max: Option<f64>,
        /// Sort order: newest or oldest
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show income, spending, and balance.
    Summary,
    /// Re-validate the stored transactions.
    Validate,
    /// Export the stored transactions as CSV.
    Export {
        /// Output path (default: transactions.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Delete the stored transactions.
    Clear,
    /// Show the store location and transaction count.
    Status,
}
