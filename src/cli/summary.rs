use colored::Colorize;
use comfy_table::{Cell, Table};

use kasa::analytics::calculate_summary;
use kasa::error::Result;
use kasa::fmt::format_currency;
use kasa::store;

use crate::cli::store_path;

pub fn run() -> Result<()> {
    let transactions = store::load(&store_path());
    let summary = calculate_summary(&transactions);

    let mut table = Table::new();
    table.add_row(vec![
        Cell::new("Income".green().to_string()),
        Cell::new(format_currency(summary.income)),
    ]);
    table.add_row(vec![
        Cell::new("Spending".red().to_string()),
        Cell::new(format_currency(summary.spending)),
    ]);
    table.add_row(vec![
        Cell::new("Balance".bold().to_string()),
        Cell::new(format_currency(summary.balance)),
    ]);
    table.add_row(vec![
        Cell::new("Transactions"),
        Cell::new(summary.total_transactions.to_string()),
    ]);

    println!("{table}");
    Ok(())
}
