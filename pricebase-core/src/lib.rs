//! Pure heuristics behind the price-list normalizer.
//!
//! Nothing in this crate touches the filesystem or the network. Spreadsheets
//! arrive here as a [`Grid`] of already-rendered text cells, and everything
//! else (header detection, column picking, cleaning, document joins) is a
//! plain function over that text.

use std::collections::HashMap;

pub mod columns;
pub mod documents;
pub mod header;
pub mod records;
pub mod search;
pub mod text;

pub use columns::{ColumnSelection, RecordLayout};
pub use documents::{DocumentRow, DocumentsMap};
pub use header::{DEFAULT_SCAN_LIMIT, find_header_row};
pub use records::{BaseRecord, OutputRecord};

/// A sheet rendered as text, row-major. Empty cells are empty strings and
/// rows may have different lengths.
pub type Grid = Vec<Vec<String>>;

/// Article → canonical product name from the secondary catalog.
pub type CatalogNames = HashMap<String, String>;

/// Article → product page URL from the secondary catalog.
pub type SiteLinks = HashMap<String, String>;

/// Borrow a cell as text, treating missing cells as empty.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Width of the widest row in a grid.
pub fn grid_width(grid: &[Vec<String>]) -> usize {
    grid.iter().map(Vec::len).max().unwrap_or(0)
}
