use std::path::Path;

use kasa::analytics::{export_to_csv, sort_transactions};
use kasa::error::Result;
use kasa::models::SortOrder;
use kasa::store;

use crate::cli::store_path;

pub fn run(output: Option<&str>) -> Result<()> {
    let transactions = store::load(&store_path());
    let sorted = sort_transactions(&transactions, SortOrder::Newest);
    let csv = export_to_csv(&sorted);

    let path = Path::new(output.unwrap_or("transactions.csv"));
    std::fs::write(path, format!("{csv}\n"))?;
    println!("Wrote {} transactions to {}", sorted.len(), path.display());

    Ok(())
}
