use crate::cells::parse_timestamp;
use crate::models::{Transaction, ValidationSummary};

/// Re-check field-level invariants over any transaction list, whatever its
/// origin. Every check runs for every transaction; warnings do not affect
/// the valid count.
pub fn validate_transactions(transactions: &[Transaction]) -> ValidationSummary {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut valid_rows = 0;

    for (index, transaction) in transactions.iter().enumerate() {
        let position = index + 1;
        let mut is_valid = true;

        if transaction.store.trim().is_empty() {
            errors.push(format!("Transaction {position}: Empty store name"));
            is_valid = false;
        }

        if transaction.purchase.trim().is_empty() {
            errors.push(format!("Transaction {position}: Empty purchase description"));
            is_valid = false;
        }

        if transaction.cost == 0.0 {
            warnings.push(format!("Transaction {position}: Zero cost amount"));
        }

        if parse_timestamp(&transaction.date).is_none() {
            errors.push(format!("Transaction {position}: Invalid date"));
            is_valid = false;
        }

        if is_valid {
            valid_rows += 1;
        }
    }

    ValidationSummary {
        total_rows: transactions.len(),
        valid_rows,
        errors,
        warnings,
    }
}
