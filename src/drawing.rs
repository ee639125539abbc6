//! Page layout helpers for the assembly drawing.
//!
//! The view scale and placement are rough estimates: the isometric view is
//! sized to cover about a fifth of the page diagonal and anchored near the
//! top-left corner.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ToolError};
use crate::model::Assembly;

/// Width of an A4 landscape page in millimetres.
pub const A4_LANDSCAPE_WIDTH: f64 = 297.0;
/// Height of an A4 landscape page in millimetres.
pub const A4_LANDSCAPE_HEIGHT: f64 = 210.0;

const PAGE_SHARE: f64 = 5.0;
const LEFT_MARGIN: f64 = 10.0;
const TOP_MARGIN: f64 = 20.0;

/// Page scale expression understood by the drawing template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScale {
    /// Written as a bare integer, e.g. `3`.
    Enlarge(i64),
    /// Written as `1/n`.
    Reduce(i64),
}

impl fmt::Display for PageScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageScale::Enlarge(factor) => write!(f, "{factor}"),
            PageScale::Reduce(divisor) => write!(f, "1/{divisor}"),
        }
    }
}

fn check_length(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ToolError::InvalidDrawing(format!(
            "{name} must be a positive length, got {value}"
        )))
    }
}

/// Estimates the page scale for a model of the given bounding diagonal.
///
/// With `x = page_diagonal / (5 * model_diagonal)`, enlargements are written
/// as `round(log2(x))` and reductions as `1/round(1/x)`.
pub fn estimate_scale(model_diagonal: f64, page_width: f64, page_height: f64) -> Result<PageScale> {
    check_length("model diagonal", model_diagonal)?;
    check_length("page width", page_width)?;
    check_length("page height", page_height)?;

    let page_diagonal = page_width.hypot(page_height);
    let ratio = page_diagonal / (PAGE_SHARE * model_diagonal);
    if ratio >= 1.0 {
        Ok(PageScale::Enlarge(ratio.log2().round() as i64))
    } else {
        Ok(PageScale::Reduce((1.0 / ratio).round() as i64))
    }
}

/// Position of the isometric view centre in millimetres, `(x, y)`.
pub fn iso_view_position(model_diagonal: f64, page_height: f64) -> (f64, f64) {
    let half = 0.5 * model_diagonal;
    (LEFT_MARGIN + half, page_height - TOP_MARGIN - half)
}

/// Document fields available to title blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub file_name: String,
    pub author: String,
}

impl From<&Assembly> for DocumentInfo {
    fn from(assembly: &Assembly) -> Self {
        Self {
            title: assembly.label.clone(),
            file_name: assembly.file_name.clone(),
            author: assembly.created_by.clone(),
        }
    }
}

/// Value the known template field `key` should receive, if any.
fn field_value(key: &str, document: &DocumentInfo, scale: &str, date: &str) -> Option<String> {
    let value = match key {
        "Designed_by_Name" | "AUTHOR_NAME" | "OWNER_NAME" => document.author.as_str(),
        "FC-DATE" | "DATE" => date,
        "FC-SC" | "Scale" | "SCALE" => scale,
        "FC-SH" | "Sheet" => "1 of 1",
        "FC-Title" | "Title" | "DRAWING_TITLE" | "TITLELINE-1" => document.title.as_str(),
        "Subtitle" | "TITLELINE-2" | "SI-1" => document.file_name.as_str(),
        _ => return None,
    };
    Some(value.to_string())
}

/// Fills the editable texts of a drawing template.
///
/// Known fields are replaced with document data, the scale and `date`; every
/// other field keeps its template default. The returned map always holds the
/// same keys as `editable`.
pub fn fill_title_block(
    editable: &BTreeMap<String, String>,
    document: &DocumentInfo,
    scale: PageScale,
    date: &str,
) -> BTreeMap<String, String> {
    let scale = scale.to_string();
    editable
        .iter()
        .map(|(key, default)| {
            let value = field_value(key, document, &scale, date).unwrap_or_else(|| default.clone());
            (key.clone(), value)
        })
        .collect()
}
