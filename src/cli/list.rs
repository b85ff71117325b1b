use colored::Colorize;
use comfy_table::{Cell, Table};

use kasa::analytics::{filter_transactions, group_transactions_by_date, sort_transactions};
use kasa::error::{KasaError, Result};
use kasa::fmt::{format_currency, format_time_for_display};
use kasa::models::{Filters, SortOrder};
use kasa::store;

use crate::cli::store_path;

fn parse_sort(sort: &str) -> Result<SortOrder> {
    match sort {
        "newest" => Ok(SortOrder::Newest),
        "oldest" => Ok(SortOrder::Oldest),
        other => Err(KasaError::Other(format!(
            "Unknown sort order: {other} (expected newest or oldest)"
        ))),
    }
}

pub fn run(
    search: Option<String>,
    from: Option<String>,
    to: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    sort: &str,
) -> Result<()> {
    let order = parse_sort(sort)?;
    let transactions = store::load(&store_path());
    if transactions.is_empty() {
        println!("No transactions stored. Run `kasa import <file>` first.");
        return Ok(());
    }

    let filters = Filters {
        search_text: search.unwrap_or_default(),
        date_from: from,
        date_to: to,
        min_amount: min,
        max_amount: max,
    };
    let filtered = filter_transactions(&transactions, &filters);
    if filtered.is_empty() {
        println!("No transactions match the filters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Time", "Store", "Purchase", "Amount"]);

    let mut groups = group_transactions_by_date(&filtered);
    if order == SortOrder::Oldest {
        groups.reverse();
        for group in &mut groups {
            group.transactions = sort_transactions(&group.transactions, SortOrder::Oldest);
        }
    }

    for group in &groups {
        table.add_row(vec![Cell::new(group.display_date.bold().to_string()), Cell::new(""), Cell::new(""), Cell::new("")]);
        for tx in &group.transactions {
            let amount = if tx.cost < 0.0 {
                format_currency(tx.cost).red().to_string()
            } else {
                format_currency(tx.cost).green().to_string()
            };
            table.add_row(vec![
                Cell::new(format!("  {}", format_time_for_display(&tx.date))),
                Cell::new(&tx.store),
                Cell::new(&tx.purchase),
                Cell::new(amount),
            ]);
        }
    }

    println!("{table}");
    println!("{} of {} transactions", filtered.len(), transactions.len());

    Ok(())
}
