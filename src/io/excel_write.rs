use std::path::Path;

use rust_xlsxwriter::{Color, ColNum, Format, FormatAlign, RowNum, Workbook, Worksheet};

use crate::bom::ReportGrid;
use crate::error::{Result, ToolError};

/// Background of the merged title row.
pub const TITLE_BACKGROUND: u32 = 0xAAAAFF;
/// Background of the column header cells.
pub const HEADER_BACKGROUND: u32 = 0xFFFECA;

/// Writes the grid to a single-sheet workbook at `path`.
///
/// The title is merged across the grid width, the header row is shaded and
/// every cell is stored as a string. Nothing is written to disk unless the
/// whole sheet could be staged.
pub fn write_grid(path: &Path, grid: &ReportGrid, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    write_title(worksheet, grid)?;

    let header_format = Format::new().set_background_color(Color::RGB(HEADER_BACKGROUND));
    for (col_idx, header) in grid.header().iter().enumerate() {
        worksheet.write_string_with_format(1, column_number(col_idx)?, header, &header_format)?;
    }

    for (row_idx, row) in grid.body().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string(row_number(row_idx + 2)?, column_number(col_idx)?, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_title(worksheet: &mut Worksheet, grid: &ReportGrid) -> Result<()> {
    let title_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(TITLE_BACKGROUND))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let last_col = column_number(grid.width().saturating_sub(1))?;
    if last_col == 0 {
        worksheet.write_string_with_format(0, 0, grid.title(), &title_format)?;
    } else {
        worksheet.merge_range(0, 0, 0, last_col, grid.title(), &title_format)?;
    }
    Ok(())
}

fn column_number(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| ToolError::InvalidWorkbook(format!("column {index} exceeds sheet width")))
}

fn row_number(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| ToolError::InvalidWorkbook(format!("row {index} exceeds sheet height")))
}
