use colored::Colorize;

use kasa::error::Result;
use kasa::store;
use kasa::validator::validate_transactions;

use crate::cli::store_path;

pub fn run() -> Result<()> {
    let transactions = store::load(&store_path());
    let summary = validate_transactions(&transactions);

    println!("{} of {} transactions valid", summary.valid_rows, summary.total_rows);
    for error in &summary.errors {
        eprintln!("{}", error.red());
    }
    for warning in &summary.warnings {
        eprintln!("{}", warning.yellow());
    }

    Ok(())
}
