//! Document listing CSV parser.
//!
//! Semicolon-separated, UTF-8, no header row. Columns in order: article,
//! category, title, URL. Extra columns are ignored.

use std::path::{Path, PathBuf};

use crate::config::DOCUMENTS_CSV_CANDIDATES;
use pricebase_core::documents::group_documents;
use pricebase_core::text::{clean_article, strip_outer_quotes};
use pricebase_core::{DocumentRow, DocumentsMap};

/// Minimum number of columns for the listing to be usable.
pub const REQUIRED_COLUMNS: usize = 4;

/// Locate the listing in `dir` by its standard candidate names.
pub fn find_documents_csv(dir: &Path) -> Option<PathBuf> {
    DOCUMENTS_CSV_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Parse listing content into cleaned rows.
///
/// Returns `None` when even the widest row has fewer than four columns.
/// Rows the CSV reader rejects are skipped with a warning.
pub fn parse_document_csv(content: &str) -> Option<Vec<DocumentRow>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    let mut width = 0;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed document CSV row: {e}");
                continue;
            }
        };
        width = width.max(record.len());

        let get = |i: usize| record.get(i).unwrap_or("");
        rows.push(DocumentRow {
            article: clean_article(get(0)),
            category: strip_outer_quotes(get(1)),
            title: strip_outer_quotes(get(2)),
            url: get(3).trim().to_string(),
        });
    }

    if width < REQUIRED_COLUMNS {
        return None;
    }
    Some(rows)
}

/// Find, read and group the document listing. Never fails: a missing,
/// unreadable or too-narrow file yields an empty map with a notice.
pub fn load_documents(dir: &Path) -> DocumentsMap {
    let Some(path) = find_documents_csv(dir) else {
        log::warn!("No document CSV found; Documents column will only carry site links.");
        return DocumentsMap::new();
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = match std::fs::read(&path).map(String::from_utf8) {
        Ok(Ok(content)) => content,
        Ok(Err(e)) => {
            log::warn!("Could not read {file_name}: not valid UTF-8 ({e})");
            return DocumentsMap::new();
        }
        Err(e) => {
            log::warn!("Could not read {file_name}: {e}");
            return DocumentsMap::new();
        }
    };

    let Some(rows) = parse_document_csv(&content) else {
        log::warn!("{file_name} has fewer than 4 columns; Documents listing skipped.");
        return DocumentsMap::new();
    };

    let map = group_documents(rows);
    log::info!("Documents from {file_name}: {} articles covered", map.len());
    map
}
