//! Base records extracted from the price list, and the final output rows.

use crate::columns::RecordLayout;
use crate::text::{clean_article, clean_name, parse_price};
use crate::{CatalogNames, cell};

/// One cleaned price-list row.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRecord {
    pub name: String,
    /// Digits only, possibly empty.
    pub article: String,
    /// `None` when the price cell did not parse.
    pub price: Option<f64>,
}

/// A row of the output spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub name: String,
    pub article: String,
    pub price: Option<f64>,
    /// Newline-separated document lines; empty when there are none.
    pub documents: String,
}

/// Clean every data row and keep those with a name or an article.
///
/// When the layout has no VAT price column, every kept row is priced `0.00`.
pub fn extract_records(rows: &[Vec<String>], layout: &RecordLayout) -> Vec<BaseRecord> {
    rows.iter()
        .map(|row| BaseRecord {
            name: clean_name(cell(row, layout.name)),
            article: clean_article(cell(row, layout.article)),
            price: match layout.price {
                Some(idx) => parse_price(cell(row, idx)),
                None => Some(0.0),
            },
        })
        .filter(|r| !r.name.is_empty() || !r.article.is_empty())
        .collect()
}

/// Replace names with the catalog's canonical ones, keyed by article.
///
/// Returns how many records were changed.
pub fn apply_name_overrides(records: &mut [BaseRecord], names: &CatalogNames) -> usize {
    let mut replaced = 0;
    for record in records.iter_mut() {
        let key = clean_article(&record.article);
        if let Some(name) = names.get(&key).filter(|n| !n.trim().is_empty()) {
            record.name = name.clone();
            replaced += 1;
        }
    }
    replaced
}
