use std::collections::HashMap;

use tracing::warn;

use crate::address::cell_address;
use crate::bom::PartGroup;
use crate::error::{Result, ToolError};
use crate::model::{MISC_KEY, NAME_KEY, QUANTITY_KEY};

/// Default title written into the first row of a BOM.
pub const DEFAULT_TITLE: &str = "Assembly4 Bill of Materials";

/// Rectangular bill-of-materials table.
///
/// Row 0 holds only the title; row 1 is the header, ending with the misc
/// column; every following row describes one part group. Header and body rows
/// all have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGrid {
    rows: Vec<Vec<String>>,
}

/// One populated cell of a [`ReportGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'g> {
    pub row: usize,
    pub col: usize,
    pub value: &'g str,
}

impl GridCell<'_> {
    /// The `A1` style name of the cell.
    pub fn address(&self) -> String {
        cell_address(self.row, self.col)
    }
}

impl ReportGrid {
    /// Assembles a grid from its parts, padding short body rows to the header
    /// width. A row with a non-empty cell beyond the header is rejected;
    /// empty trailing cells past the header are dropped.
    pub fn from_parts(title: String, header: Vec<String>, body: Vec<Vec<String>>) -> Result<Self> {
        let width = header.len();
        let mut rows = Vec::with_capacity(body.len() + 2);
        rows.push(vec![title]);
        rows.push(header);
        for (index, mut row) in body.into_iter().enumerate() {
            if let Some(col) = row.iter().skip(width).position(|cell| !cell.is_empty()) {
                return Err(ToolError::InvalidWorkbook(format!(
                    "data row {} has a value in {} beyond the header",
                    index + 1,
                    cell_address(index + 2, width + col)
                )));
            }
            row.resize(width, String::new());
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn title(&self) -> &str {
        &self.rows[0][0]
    }

    pub fn header(&self) -> &[String] {
        &self.rows[1]
    }

    /// Data rows, one per part group.
    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[2..]
    }

    /// All rows, title first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns of the header and data rows.
    pub fn width(&self) -> usize {
        self.header().len()
    }

    /// Position of a header column.
    pub fn column(&self, key: &str) -> Option<usize> {
        self.header().iter().position(|header| header == key)
    }

    /// Value of `key` in data row `index`.
    pub fn value(&self, index: usize, key: &str) -> Option<&str> {
        let col = self.column(key)?;
        self.body().get(index).map(|row| row[col].as_str())
    }

    /// Iterates every cell row-major, left to right, top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = GridCell<'_>> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(col, value)| GridCell {
                row,
                col,
                value: value.as_str(),
            })
        })
    }
}

/// Formats one misc fragment.
pub fn misc_fragment(key: &str, value: &str) -> String {
    format!("{key}: {value}, ")
}

/// Lays out `groups` under `columns`.
///
/// `columns` are the dedicated columns in display order, normally starting
/// with `Name` and `Quantity`; the misc column is appended. Fields without a
/// dedicated column land in the misc cell, in record order.
pub fn build_grid(groups: &[PartGroup<'_>], columns: &[String], title: &str) -> ReportGrid {
    let positions: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(index, key)| (key.as_str(), index))
        .collect();
    let misc = columns.len();

    let mut header = columns.to_vec();
    header.push(MISC_KEY.to_string());

    let mut body = Vec::with_capacity(groups.len());
    for group in groups {
        let mut row = vec![String::new(); misc + 1];
        if let Some(&index) = positions.get(NAME_KEY) {
            row[index] = group.instance.linked_label().to_string();
        }
        if let Some(&index) = positions.get(QUANTITY_KEY) {
            row[index] = group.count.to_string();
        }

        for (key, value) in group.info.iter() {
            match positions.get(key) {
                Some(&index) if key != NAME_KEY && key != QUANTITY_KEY => {
                    row[index] = value.to_string();
                }
                Some(_) => {
                    warn!(
                        part = group.instance.identity(),
                        key, "reserved key found in part information"
                    );
                    row[misc].push_str(&misc_fragment(key, value));
                }
                None => row[misc].push_str(&misc_fragment(key, value)),
            }
        }

        body.push(row);
    }

    let mut rows = Vec::with_capacity(body.len() + 2);
    rows.push(vec![title.to_string()]);
    rows.push(header);
    rows.extend(body);
    ReportGrid { rows }
}
