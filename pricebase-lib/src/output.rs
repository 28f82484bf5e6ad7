//! Writing the enriched base: the spreadsheet and the optional JSON search base.

use std::path::Path;

use serde::Serialize;
use umya_spreadsheet::Spreadsheet;

use crate::error::PipelineError;
use pricebase_core::OutputRecord;
use pricebase_core::search::search_key;

/// Name of the single sheet in the output workbook.
pub const SHEET_NAME: &str = "TDSheet";

/// Output column headers, in order.
pub const HEADERS: [&str; 4] = ["Наименование", "Артикул", "Цена", "Документы"];

const PRICE_FORMAT: &str = "0.00";

/// Build the output workbook in memory.
///
/// Articles are written as text so leading zeros survive. A missing price
/// leaves the cell empty. The Documents column wraps so that each line shows
/// on its own.
pub fn build_workbook(records: &[OutputRecord]) -> Result<Spreadsheet, PipelineError> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| PipelineError::output("new workbook has no sheet"))?;
    sheet.set_name(SHEET_NAME);

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .get_cell_mut((col as u32 + 1, 1))
            .set_value_string(*header);
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 2;
        sheet.get_cell_mut((1, row)).set_value_string(&record.name);
        sheet.get_cell_mut((2, row)).set_value_string(&record.article);
        if let Some(price) = record.price {
            let cell = sheet.get_cell_mut((3, row));
            cell.set_value_number(price);
            cell.get_style_mut()
                .get_number_format_mut()
                .set_format_code(PRICE_FORMAT);
        }
        if !record.documents.is_empty() {
            let cell = sheet.get_cell_mut((4, row));
            cell.set_value_string(&record.documents);
            cell.get_style_mut().get_alignment_mut().set_wrap_text(true);
        }
    }

    Ok(book)
}

/// Write the output spreadsheet, replacing any existing file.
pub fn write_workbook(path: &Path, records: &[OutputRecord]) -> Result<(), PipelineError> {
    let book = build_workbook(records)?;
    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| PipelineError::output(format!("{}: {e}", path.display())))
}

/// One entry of the JSON search base.
#[derive(Debug, Serialize)]
pub struct SearchEntry<'a> {
    pub name: &'a str,
    pub article: &'a str,
    pub price: Option<f64>,
    pub documents: &'a str,
    #[serde(rename = "__name")]
    pub name_key: String,
    #[serde(rename = "__article")]
    pub article_key: String,
}

impl<'a> SearchEntry<'a> {
    pub fn from_record(record: &'a OutputRecord) -> Self {
        Self {
            name: &record.name,
            article: &record.article,
            price: record.price,
            documents: &record.documents,
            name_key: search_key(&record.name),
            article_key: search_key(&record.article),
        }
    }
}

/// Render the records as a pretty-printed JSON array with precomputed
/// search keys.
pub fn render_search_json(records: &[OutputRecord]) -> Result<String, PipelineError> {
    let entries: Vec<SearchEntry<'_>> = records.iter().map(SearchEntry::from_record).collect();
    serde_json::to_string_pretty(&entries)
        .map_err(|e| PipelineError::output(format!("search base: {e}")))
}

/// Write an already rendered search base.
pub fn write_search_text(path: &Path, json: &str) -> Result<(), PipelineError> {
    std::fs::write(path, json)
        .map_err(|e| PipelineError::output(format!("{}: {e}", path.display())))
}

/// Render and write the JSON search base.
pub fn write_search_json(path: &Path, records: &[OutputRecord]) -> Result<(), PipelineError> {
    write_search_text(path, &render_search_json(records)?)
}
