use std::path::Path;

use crate::error::{KasaError, Result};
use crate::models::Transaction;

/// Persist the transaction list as pretty JSON, creating parent
/// directories as needed.
pub fn save(path: &Path, transactions: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(transactions)
        .map_err(|e| KasaError::Storage(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Load the stored list. A missing or corrupt store reads as empty rather
/// than failing.
pub fn load(path: &Path) -> Vec<Transaction> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

pub fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
