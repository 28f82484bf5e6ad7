//! Header row detection.
//!
//! Price lists usually start with a logo, an address block and a few blank
//! rows before the actual table. The header row is the one whose cells mention
//! the most of {name, article, price}, scanned over the first rows only.

/// Substrings that mark a product-name header cell.
pub const NAME_SYNONYMS: &[&str] = &[
    "наименование",
    "номенклатура",
    "название",
    "товар",
    "позиция",
    "product",
    "item",
    "name",
    "наим",
    "описание",
    "model",
];

/// Substrings that mark an article-code header cell.
pub const ARTICLE_SYNONYMS: &[&str] = &["артикул", "sku", "код", "article", "part", "номер", "id"];

/// Substrings that hint at a price header cell. Used for scoring only; the
/// price column itself must carry VAT phrasing (see [`crate::columns`]).
pub const PRICE_HINTS: &[&str] = &["цена", "руб", "стоимость", "price", "amount"];

/// How many leading rows are considered when looking for the header.
pub const DEFAULT_SCAN_LIMIT: usize = 120;

/// Case-insensitive substring test of a single cell against a synonym list.
pub fn contains_synonym(cell: &str, synonyms: &[&str]) -> bool {
    let low = cell.trim().to_lowercase();
    if low.is_empty() {
        return false;
    }
    synonyms.iter().any(|s| low.contains(s))
}

/// Score a row from 0 to 3: one point each for a name, article and price hit.
pub fn row_score(row: &[String]) -> u8 {
    let hit = |synonyms: &[&str]| row.iter().any(|c| contains_synonym(c, synonyms));
    u8::from(hit(NAME_SYNONYMS)) + u8::from(hit(ARTICLE_SYNONYMS)) + u8::from(hit(PRICE_HINTS))
}

/// Index of the best-scoring row among the first `scan_limit` rows.
///
/// Ties go to the earliest row. An empty grid yields row 0. The result is a
/// guess: a sheet with a decorative row full of keywords above the real
/// header will pick the wrong one without complaint.
pub fn find_header_row(grid: &[Vec<String>], scan_limit: usize) -> usize {
    let mut best: Option<(usize, u8)> = None;
    for (idx, row) in grid.iter().take(scan_limit).enumerate() {
        let score = row_score(row);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx).unwrap_or(0)
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
