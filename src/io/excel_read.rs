use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::bom::ReportGrid;
use crate::error::{Result, ToolError};

/// Reads a BOM sheet written by [`write_grid`](crate::io::excel_write::write_grid)
/// back into a [`ReportGrid`].
///
/// Short rows are padded; a value to the right of the header fails with
/// [`ToolError::InvalidWorkbook`] rather than being dropped.
pub fn read_grid(path: &Path, sheet_name: &str) -> Result<ReportGrid> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, sheet_name)?;

    let mut rows = range.rows();
    let title = rows
        .next()
        .map(|row| cell_to_string(row.first()))
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("sheet '{sheet_name}' is empty")))?;

    let mut header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .ok_or_else(|| {
            ToolError::InvalidWorkbook(format!("sheet '{sheet_name}' has no header row"))
        })?;
    while header.last().is_some_and(String::is_empty) {
        header.pop();
    }
    if header.is_empty() {
        return Err(ToolError::InvalidWorkbook(format!(
            "sheet '{sheet_name}' has an empty header row"
        )));
    }

    let body: Vec<Vec<String>> = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, DataType::Empty)))
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .collect();

    ReportGrid::from_parts(title, header, body)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
