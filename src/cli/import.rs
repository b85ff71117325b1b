use colored::Colorize;

use kasa::error::Result;
use kasa::{importer, store};

use crate::cli::store_path;

pub fn run(file: &str) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let result = importer::parse_workbook(&bytes);

    for error in &result.errors {
        eprintln!("{}", error.red());
    }
    for warning in &result.warnings {
        eprintln!("{}", warning.yellow());
    }

    if result.transactions.is_empty() {
        if result.errors.is_empty() {
            println!("No valid transactions in file.");
        }
        return Ok(());
    }

    store::save(&store_path(), &result.transactions)?;
    println!(
        "Imported {} transactions ({} errors, {} warnings)",
        result.transactions.len(),
        result.errors.len(),
        result.warnings.len()
    );

    Ok(())
}
