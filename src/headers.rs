use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::CellValue;

/// Synonym table mapping normalized header text to the canonical field
/// vocabulary: date, time, store, purchase, cost.
static HEADER_MAPPINGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // English
        ("date", "date"),
        ("time", "time"),
        ("store", "store"),
        ("purchase", "purchase"),
        ("cost", "cost"),
        // Ukrainian
        ("дата", "date"),
        ("час", "time"),
        ("магазин", "store"),
        ("покупка", "purchase"),
        ("вартість", "cost"),
        // Variations
        ("shop", "store"),
        ("merchant", "store"),
        ("amount", "cost"),
        ("price", "cost"),
        ("sum", "cost"),
        ("сума", "cost"),
    ])
});

/// Lower-case, trim, strip interior whitespace and underscores, then map
/// through the synonym table. Unmapped headers come back in their
/// normalized form rather than the original spelling.
pub fn normalize_header(header: &str) -> String {
    let normalized: String = header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    match HEADER_MAPPINGS.get(normalized.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => normalized,
    }
}

/// Map a header row to field-name → column-index. Non-text and empty
/// headers are skipped. Duplicate names are last-wins; the importer
/// surfaces those via [`duplicate_headers`].
pub fn normalize_headers(headers: &[CellValue]) -> HashMap<String, usize> {
    let mut header_map = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        if let CellValue::Text(text) = header {
            if !text.is_empty() {
                header_map.insert(normalize_header(text), index);
            }
        }
    }
    header_map
}

/// Field names claimed by more than one column in the header row.
pub fn duplicate_headers(headers: &[CellValue]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for header in headers {
        if let CellValue::Text(text) = header {
            if !text.is_empty() {
                *counts.entry(normalize_header(text)).or_default() += 1;
            }
        }
    }
    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();
    duplicates.sort();
    duplicates
}
