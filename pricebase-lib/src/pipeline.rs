//! The end-to-end run: download, parse, enrich, write.

use std::path::{Path, PathBuf};

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::doc_csv::{find_documents_csv, load_documents};
use crate::download::download;
use crate::error::PipelineError;
use crate::output::{render_search_json, write_search_text, write_workbook};
use crate::progress::PipelineProgress;
use crate::sheet::{read_grid, split_header};
use pricebase_core::documents::attach_documents;
use pricebase_core::records::{apply_name_overrides, extract_records};
use pricebase_core::{ColumnSelection, find_header_row};

/// What a run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Zero-based header row in the source sheet
    pub header_row: usize,
    /// Columns picked from the header row
    pub columns: ColumnSelection,
    /// Records written
    pub rows: usize,
    /// Records whose name came from the catalog
    pub names_replaced: usize,
    /// Articles with a product page link
    pub site_links: usize,
    /// Articles with at least one listed document
    pub documented_articles: usize,
    /// Catalog file used for enrichment, if one was found
    pub catalog: Option<PathBuf>,
    /// Document listing used, if one was found
    pub documents_csv: Option<PathBuf>,
    /// The written spreadsheet
    pub output: PathBuf,
    /// The written JSON search base, if requested
    pub search_json: Option<PathBuf>,
}

/// Run the whole pipeline against the configured URL.
///
/// The temporary download is removed whether or not processing succeeds.
pub fn run(config: &Config, progress: &dyn PipelineProgress) -> Result<RunSummary, PipelineError> {
    let url = config
        .source_url
        .as_deref()
        .ok_or(PipelineError::MissingUrl)?;

    let download = download(url, &config.work_dir, &config.temp_basename, progress)?;
    let result = process_file(config, download.path(), progress);
    download.cleanup();
    result
}

/// Process an already-available price list file.
///
/// Optional inputs (catalog, document listing) are looked up in the work
/// directory. Nothing is written if the required columns are missing.
pub fn process_file(
    config: &Config,
    source: &Path,
    progress: &dyn PipelineProgress,
) -> Result<RunSummary, PipelineError> {
    progress.on_phase("Reading price list");
    let grid = read_grid(source, config.sheet_index)?;
    log::debug!("Read {} rows from {}", grid.len(), source.display());

    let header_row = find_header_row(&grid, config.header_scan_limit);
    let (headers, rows) = split_header(grid, header_row);
    log::info!("Header row: {} ({} data rows)", header_row + 1, rows.len());

    let columns = ColumnSelection::from_headers(&headers);
    let Some(layout) = columns.layout() else {
        return Err(PipelineError::MissingColumns { headers });
    };
    log::info!(
        "Columns: name={}, article={}, price={}",
        headers[layout.name],
        headers[layout.article],
        layout
            .price
            .map(|i| headers[i].as_str())
            .unwrap_or("(none, prices set to 0)"),
    );

    let mut records = extract_records(&rows, &layout);
    log::info!("Extracted {} records", records.len());

    progress.on_phase("Enriching from catalog");
    let catalog = load_catalog(&config.work_dir, config.catalog_filename_override.as_deref());
    let names_replaced = apply_name_overrides(&mut records, &catalog.names);
    if catalog.source.is_some() {
        log::info!("Names replaced from catalog: {names_replaced}");
    }

    progress.on_phase("Collecting documents");
    let documents_csv = find_documents_csv(&config.work_dir);
    let documents = load_documents(&config.work_dir);
    let records = attach_documents(records, &catalog.site_links, &documents);

    progress.on_phase("Writing output");
    let search_base = if config.search_json {
        Some((config.search_json_path(), render_search_json(&records)?))
    } else {
        None
    };

    let output = config.output_path();
    write_workbook(&output, &records)?;
    log::info!("Wrote {} rows to {}", records.len(), output.display());

    let search_json = match search_base {
        Some((path, json)) => {
            if let Err(e) = write_search_text(&path, &json) {
                discard_output(&output);
                return Err(e);
            }
            log::info!("Wrote search base to {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(RunSummary {
        header_row,
        columns,
        rows: records.len(),
        names_replaced,
        site_links: catalog.site_links.len(),
        documented_articles: documents.len(),
        catalog: catalog.source,
        documents_csv,
        output,
        search_json,
    })
}

/// Remove a workbook written by a run that failed afterwards.
fn discard_output(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("Could not remove partial output {}: {e}", path.display());
    }
}
