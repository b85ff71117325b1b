use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::cells::parse_timestamp;
use crate::fmt::{format_date_for_display, format_time_for_display};
use crate::models::{Filters, GroupedTransactions, SortOrder, Summary, Transaction};

/// Day-level view of a timestamp or a bare `yyyy-MM-dd` filter bound.
fn day_of(value: &str) -> Option<NaiveDate> {
    parse_timestamp(value)
        .map(|ts| ts.date_naive())
        .or_else(|| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
}

fn timestamp_millis(value: &str) -> i64 {
    parse_timestamp(value).map_or(0, |ts| ts.timestamp_millis())
}

fn matches_filters(transaction: &Transaction, filters: &Filters) -> bool {
    if !filters.search_text.is_empty() {
        let needle = filters.search_text.to_lowercase();
        let in_store = transaction.store.to_lowercase().contains(&needle);
        let in_purchase = transaction.purchase.to_lowercase().contains(&needle);
        if !in_store && !in_purchase {
            return false;
        }
    }

    if filters.date_from.is_some() || filters.date_to.is_some() {
        let Some(day) = day_of(&transaction.date) else {
            return false;
        };
        if let Some(from) = filters.date_from.as_deref().and_then(day_of) {
            if day < from {
                return false;
            }
        }
        if let Some(to) = filters.date_to.as_deref().and_then(day_of) {
            if day > to {
                return false;
            }
        }
    }

    if let Some(min) = filters.min_amount {
        if transaction.cost.abs() < min {
            return false;
        }
    }
    if let Some(max) = filters.max_amount {
        if transaction.cost.abs() > max {
            return false;
        }
    }

    true
}

/// Keep transactions matching every active constraint: case-insensitive
/// text over store/purchase, inclusive day-level date range, and
/// `abs(cost)` against the amount bounds.
pub fn filter_transactions(transactions: &[Transaction], filters: &Filters) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| matches_filters(transaction, filters))
        .cloned()
        .collect()
}

/// Stable sort by timestamp; the input list is left untouched.
pub fn sort_transactions(transactions: &[Transaction], order: SortOrder) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    match order {
        SortOrder::Newest => {
            sorted.sort_by(|a, b| timestamp_millis(&b.date).cmp(&timestamp_millis(&a.date)))
        }
        SortOrder::Oldest => {
            sorted.sort_by(|a, b| timestamp_millis(&a.date).cmp(&timestamp_millis(&b.date)))
        }
    }
    sorted
}

/// Bucket by calendar day, newest day first, each bucket newest-first
/// inside. Transactions whose timestamp cannot be parsed are dropped.
pub fn group_transactions_by_date(transactions: &[Transaction]) -> Vec<GroupedTransactions> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        let Some(day) = day_of(&transaction.date) else {
            continue;
        };
        groups
            .entry(day.format("%Y-%m-%d").to_string())
            .or_default()
            .push(transaction.clone());
    }

    // yyyy-MM-dd keys sort lexicographically in date order; reverse for
    // newest-day-first.
    groups
        .into_iter()
        .rev()
        .map(|(date, bucket)| GroupedTransactions {
            display_date: format_date_for_display(&bucket[0].date),
            transactions: sort_transactions(&bucket, SortOrder::Newest),
            date,
        })
        .collect()
}

/// Spending is the absolute sum of outflows, income the sum of inflows.
pub fn calculate_summary(transactions: &[Transaction]) -> Summary {
    let spending: f64 = transactions
        .iter()
        .filter(|t| t.cost < 0.0)
        .map(|t| t.cost.abs())
        .sum();
    let income: f64 = transactions
        .iter()
        .filter(|t| t.cost > 0.0)
        .map(|t| t.cost)
        .sum();

    Summary {
        balance: income - spending,
        spending,
        income,
        total_transactions: transactions.len(),
    }
}

/// `Date,Time,Store,Purchase,Cost` lines, `\n`-joined. Date and time are
/// recomputed from the timestamp; store and purchase are always quoted;
/// cost stays a plain decimal.
pub fn export_to_csv(transactions: &[Transaction]) -> String {
    let mut lines = vec!["Date,Time,Store,Purchase,Cost".to_string()];
    for transaction in transactions {
        let date = match parse_timestamp(&transaction.date) {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => transaction.date.clone(),
        };
        lines.push(format!(
            "{date},{time},\"{store}\",\"{purchase}\",{cost}",
            time = format_time_for_display(&transaction.date),
            store = transaction.store,
            purchase = transaction.purchase,
            cost = transaction.cost,
        ));
    }
    lines.join("\n")
}
