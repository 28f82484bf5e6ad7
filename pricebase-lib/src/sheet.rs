//! Reading `.xls` / `.xlsx` workbooks into a text grid.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Ods, Reader, Sheets, Xls, Xlsb, Xlsx, open_workbook};

use crate::error::PipelineError;
use pricebase_core::Grid;

/// Workbook container, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookKind {
    Xls,
    Xlsx,
    Xlsb,
    Ods,
}

impl WorkbookKind {
    /// Match an extension case-insensitively (`PRODUCTS.XLSX` is fine).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xls" | "xla" => Some(Self::Xls),
            "xlsx" | "xlsm" | "xlam" => Some(Self::Xlsx),
            "xlsb" => Some(Self::Xlsb),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }
}

/// Render one cell as text. Integral floats print without a fraction
/// (`1500.0` → `"1500"`), which keeps numeric article codes intact.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Check the file extension before handing the file to the reader.
pub fn check_format(path: &Path) -> Result<WorkbookKind, PipelineError> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(WorkbookKind::from_extension)
        .ok_or_else(|| {
            PipelineError::unsupported_format(format!(
                "{} (expected .xls or .xlsx)",
                path.display()
            ))
        })
}

fn open_sheets(path: &Path, kind: WorkbookKind) -> Result<Sheets<BufReader<File>>, PipelineError> {
    let sheets = match kind {
        WorkbookKind::Xls => open_workbook::<Xls<_>, _>(path)
            .map(Sheets::Xls)
            .map_err(|e| PipelineError::unreadable(path, e))?,
        WorkbookKind::Xlsx => open_workbook::<Xlsx<_>, _>(path)
            .map(Sheets::Xlsx)
            .map_err(|e| PipelineError::unreadable(path, e))?,
        WorkbookKind::Xlsb => open_workbook::<Xlsb<_>, _>(path)
            .map(Sheets::Xlsb)
            .map_err(|e| PipelineError::unreadable(path, e))?,
        WorkbookKind::Ods => open_workbook::<Ods<_>, _>(path)
            .map(Sheets::Ods)
            .map_err(|e| PipelineError::unreadable(path, e))?,
    };
    Ok(sheets)
}

/// Read one sheet of a workbook as a grid anchored at cell A1.
///
/// The reader trims leading empty rows and columns from the used range; they
/// are padded back so that column 0 is always column A.
pub fn read_grid(path: &Path, sheet_index: usize) -> Result<Grid, PipelineError> {
    let kind = check_format(path)?;

    let mut workbook = open_sheets(path, kind)?;
    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| PipelineError::unreadable(path, format!("no sheet at index {sheet_index}")))?
        .map_err(|e| PipelineError::unreadable(path, e))?;

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut grid: Grid = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); first_col as usize];
        cells.extend(row.iter().map(cell_text));
        grid.push(cells);
    }
    Ok(grid)
}

/// Split a grid at the header row into trimmed header cells and data rows.
pub fn split_header(mut grid: Grid, header_row: usize) -> (Vec<String>, Vec<Vec<String>>) {
    if header_row >= grid.len() {
        return (Vec::new(), Vec::new());
    }
    let rows = grid.split_off(header_row + 1);
    let headers = grid
        .pop()
        .unwrap_or_default()
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    (headers, rows)
}
