//! The secondary product catalog (`products.xlsx` and friends).
//!
//! The file has no header row. Column A holds the article, column C the
//! canonical product name (often wrapped in single quotes) and column N the
//! product page URL.

use std::path::{Path, PathBuf};

use crate::config::CATALOG_CANDIDATES;
use crate::sheet;
use pricebase_core::text::{clean_article, strip_outer_quotes};
use pricebase_core::{CatalogNames, Grid, SiteLinks, cell, grid_width};

/// Column holding the article code.
pub const ARTICLE_COLUMN: usize = 0;
/// Column holding the canonical product name.
pub const NAME_COLUMN: usize = 2;
/// Column holding the product page URL.
pub const SITE_URL_COLUMN: usize = 13;

/// Lookups built from the catalog. Both are empty when the file is absent.
#[derive(Debug, Clone, Default)]
pub struct CatalogTables {
    pub names: CatalogNames,
    pub site_links: SiteLinks,
    /// The file the tables came from.
    pub source: Option<PathBuf>,
}

/// Locate the catalog in `dir`: the explicit override first, then the
/// standard candidate names.
pub fn find_catalog_file(dir: &Path, override_name: Option<&str>) -> Option<PathBuf> {
    override_name
        .into_iter()
        .chain(CATALOG_CANDIDATES.iter().copied())
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Article → canonical name. The first row for an article wins; rows with
/// an empty article or name are skipped.
///
/// Returns `None` when the grid has fewer than three columns.
pub fn catalog_names_from_grid(grid: &Grid) -> Option<CatalogNames> {
    if grid_width(grid) <= NAME_COLUMN {
        return None;
    }
    let mut names = CatalogNames::new();
    for row in grid {
        let article = clean_article(cell(row, ARTICLE_COLUMN));
        let name = strip_outer_quotes(cell(row, NAME_COLUMN));
        if article.is_empty() || name.is_empty() {
            continue;
        }
        names.entry(article).or_insert(name);
    }
    Some(names)
}

/// Article → product page URL. Only `http://` / `https://` values count.
/// A later row for the same article replaces an earlier one.
///
/// Returns `None` when the grid has fewer than fourteen columns.
pub fn site_links_from_grid(grid: &Grid) -> Option<SiteLinks> {
    if grid_width(grid) <= SITE_URL_COLUMN {
        return None;
    }
    let mut links = SiteLinks::new();
    for row in grid {
        let article = clean_article(cell(row, ARTICLE_COLUMN));
        let url = cell(row, SITE_URL_COLUMN).trim();
        if article.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            continue;
        }
        // TODO: confirm with the catalog owner whether the first or the last
        // URL per article is the intended one; names keep the first.
        links.insert(article, url.to_string());
    }
    Some(links)
}

/// Find, read and index the catalog. Never fails: a missing or unreadable
/// file just leaves the tables empty, with a notice in the log.
pub fn load_catalog(dir: &Path, override_name: Option<&str>) -> CatalogTables {
    let Some(path) = find_catalog_file(dir, override_name) else {
        log::warn!("No products file found; name enrichment and site links skipped.");
        return CatalogTables::default();
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let grid = match sheet::read_grid(&path, 0) {
        Ok(grid) => grid,
        Err(e) => {
            log::warn!("Could not read {file_name}: {e}");
            return CatalogTables::default();
        }
    };

    let names = catalog_names_from_grid(&grid).unwrap_or_else(|| {
        log::warn!("{file_name} has fewer than 3 columns; name enrichment skipped.");
        CatalogNames::new()
    });

    let site_links = match site_links_from_grid(&grid) {
        Some(links) => {
            log::info!("Site links from {file_name}: {} articles covered", links.len());
            links
        }
        None => {
            log::info!("{file_name} has fewer than 14 columns; site links skipped.");
            SiteLinks::new()
        }
    };

    CatalogTables {
        names,
        site_links,
        source: Some(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_row(article: &str, name: &str, url: &str) -> Vec<String> {
        let mut row = vec![String::new(); 14];
        row[0] = article.to_string();
        row[2] = name.to_string();
        row[13] = url.to_string();
        row
    }

    #[test]
    fn test_names_first_occurrence_wins() {
        let grid = vec![
            wide_row("АБ-123", "'Насос   ЦНС'", ""),
            wide_row("123", "'Другое имя'", ""),
            wide_row("", "'Без артикула'", ""),
            wide_row("456", "''", ""),
        ];
        let names = catalog_names_from_grid(&grid).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names["123"], "Насос ЦНС");
    }

    #[test]
    fn test_site_links_last_occurrence_wins() {
        let grid = vec![
            wide_row("1", "", "https://site/old"),
            wide_row("1", "", "https://site/new"),
            wide_row("2", "", "ftp://nope"),
            wide_row("3", "", "  http://site/3  "),
            wide_row("", "", "https://site/none"),
        ];
        let links = site_links_from_grid(&grid).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links["1"], "https://site/new");
        assert_eq!(links["3"], "http://site/3");
    }

    #[test]
    fn test_narrow_grids_are_rejected() {
        let grid = vec![vec!["1".to_string(), "x".to_string()]];
        assert!(catalog_names_from_grid(&grid).is_none());
        assert!(site_links_from_grid(&grid).is_none());

        let grid = vec![vec!["1".to_string(), "x".to_string(), "Name".to_string()]];
        assert!(catalog_names_from_grid(&grid).is_some());
        assert!(site_links_from_grid(&grid).is_none());
    }

    #[test]
    fn test_find_catalog_prefers_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("products.xlsx"), b"x").unwrap();
        std::fs::write(dir.path().join("custom.xlsx"), b"x").unwrap();

        let found = find_catalog_file(dir.path(), Some("custom.xlsx")).unwrap();
        assert!(found.ends_with("custom.xlsx"));

        let found = find_catalog_file(dir.path(), Some("missing.xlsx")).unwrap();
        assert!(found.ends_with("products.xlsx"));
    }

    #[test]
    fn test_upper_case_override_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut((1, 1)).set_value_string("123");
        sheet.get_cell_mut((3, 1)).set_value_string("'Насос ЦНС 38'");
        umya_spreadsheet::writer::xlsx::write(&book, dir.path().join("Products.XLSX")).unwrap();

        let tables = load_catalog(dir.path(), Some("Products.XLSX"));
        assert!(tables.source.is_some());
        assert_eq!(tables.names["123"], "Насос ЦНС 38");
    }

    #[test]
    fn test_missing_catalog_yields_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let tables = load_catalog(dir.path(), None);
        assert!(tables.names.is_empty());
        assert!(tables.site_links.is_empty());
        assert!(tables.source.is_none());
    }
}
