//! Column selection within the detected header row.

use std::sync::LazyLock;

use regex::Regex;

use crate::header::{ARTICLE_SYNONYMS, NAME_SYNONYMS};

/// Header texts accepted verbatim (case-insensitive) for the name column.
pub const NAME_EXACT: &[&str] = &["номенклатура", "наименование"];

/// Header texts accepted verbatim (case-insensitive) for the article column.
pub const ARTICLE_EXACT: &[&str] = &["артикул"];

/// The price column must be the VAT-inclusive one. Matched against the
/// lower-cased header.
static PRICE_VAT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"цена\s*\(\s*с\s*ндс\s*\)", r"цена\s*с\s*ндс", r"price.*vat"]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern"))
        .collect()
});

/// Pick a column by exact header text, falling back to synonym search.
///
/// Exact candidates are tried in the order given; the synonym fallback
/// returns the first header (left to right) containing any synonym. Blank
/// headers are never picked.
pub fn pick_column(headers: &[String], exact: &[&str], synonyms: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    for candidate in exact {
        if let Some(idx) = lowered.iter().position(|h| !h.is_empty() && h == candidate) {
            return Some(idx);
        }
    }

    lowered
        .iter()
        .position(|h| !h.is_empty() && synonyms.iter().any(|s| h.contains(s)))
}

/// Pick the VAT-inclusive price column, if any header says so.
pub fn pick_price_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| {
        let low = h.trim().to_lowercase();
        !low.is_empty() && PRICE_VAT_PATTERNS.iter().any(|re| re.is_match(&low))
    })
}

/// Column indices resolved from a header row. Any of them may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    pub name: Option<usize>,
    pub article: Option<usize>,
    pub price: Option<usize>,
}

/// The columns needed to extract records. Name and article are mandatory;
/// without a VAT price column every row is priced at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: usize,
    pub article: usize,
    pub price: Option<usize>,
}

impl ColumnSelection {
    pub fn from_headers(headers: &[String]) -> Self {
        Self {
            name: pick_column(headers, NAME_EXACT, NAME_SYNONYMS),
            article: pick_column(headers, ARTICLE_EXACT, ARTICLE_SYNONYMS),
            price: pick_price_column(headers),
        }
    }

    /// The extraction layout, or `None` if name or article is unresolved.
    pub fn layout(&self) -> Option<RecordLayout> {
        Some(RecordLayout {
            name: self.name?,
            article: self.article?,
            price: self.price,
        })
    }
}
