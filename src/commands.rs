use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::bom::{self, ReportGrid};
use crate::config::BomConfig;
use crate::drawing::{self, DocumentInfo};
use crate::error::{Result, ToolError};
use crate::info::{self, InfoChanges};
use crate::io::assembly::{read_assembly, write_assembly};
use crate::io::excel_write;
use crate::model::{Assembly, MetadataRecord, Part};

/// Generates the BOM of an assembly document and writes it as a workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn make_bom_sheet(input: &Path, output: &Path, config: &BomConfig) -> Result<ReportGrid> {
    config.validate()?;
    let assembly = read_assembly(input)?;
    let instances = bom::collect_instances(&assembly);
    info!(instance_count = instances.len(), "resolved part instances");
    let policy = config.policy(&assembly.required_info);
    debug!(?policy, "column policy selected");
    let grid = bom::build_bom(&instances, &policy, &config.title)?;
    debug!(
        row_count = grid.body().len(),
        column_count = grid.width(),
        "BOM grid constructed"
    );
    excel_write::write_grid(output, &grid, &config.sheet_name)?;
    Ok(grid)
}

fn find_part<'a>(assembly: &'a mut Assembly, part_id: &str) -> Result<&'a mut Part> {
    assembly
        .part_mut(part_id)
        .ok_or_else(|| ToolError::UnknownPart(part_id.to_string()))
}

/// Reads the information of one part, including required fields it does not
/// carry yet. The document on disk is not modified.
#[instrument(level = "info", skip_all, fields(input = %input.display(), part = part_id))]
pub fn show_info(input: &Path, part_id: &str) -> Result<MetadataRecord> {
    let mut assembly = read_assembly(input)?;
    let required = assembly.required_info.clone();
    let part = find_part(&mut assembly, part_id)?;
    info::ensure_required(part, &required);
    Ok(info::read_info(part))
}

/// Adds a field to a part and saves the document. Returns the stored name.
#[instrument(level = "info", skip_all, fields(input = %input.display(), part = part_id))]
pub fn add_info_field(input: &Path, part_id: &str, raw_name: &str) -> Result<String> {
    let mut assembly = read_assembly(input)?;
    let required = assembly.required_info.clone();
    let part = find_part(&mut assembly, part_id)?;
    info::ensure_required(part, &required);
    let name = info::add_field(part, raw_name)?;
    write_assembly(input, &assembly)?;
    info!(field = %name, "part information field added");
    Ok(name)
}

/// Commits staged edits to a part and saves the document. Returns the part
/// information as stored after the commit.
#[instrument(level = "info", skip_all, fields(input = %input.display(), part = part_id))]
pub fn edit_info(input: &Path, part_id: &str, changes: &InfoChanges) -> Result<MetadataRecord> {
    let mut assembly = read_assembly(input)?;
    let required = assembly.required_info.clone();
    let part = find_part(&mut assembly, part_id)?;
    info::ensure_required(part, &required);
    info::commit(part, changes, &required)?;
    let record = info::read_info(part);
    write_assembly(input, &assembly)?;
    info!(field_count = record.len(), "part information saved");
    Ok(record)
}

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: drawing::A4_LANDSCAPE_WIDTH,
            height: drawing::A4_LANDSCAPE_HEIGHT,
        }
    }
}

/// Fills a drawing template's editable texts for an assembly and writes them
/// as JSON.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), template = %template.display(), output = %output.display())
)]
pub fn make_title_block(
    input: &Path,
    template: &Path,
    output: &Path,
    date: &str,
    page: PageSize,
) -> Result<BTreeMap<String, String>> {
    let assembly = read_assembly(input)?;
    if !template.exists() {
        return Err(ToolError::MissingInput(template.to_path_buf()));
    }
    let editable: BTreeMap<String, String> =
        serde_json::from_str(&fs::read_to_string(template)?)?;

    let diagonal = assembly.bounding_diagonal.ok_or_else(|| {
        ToolError::InvalidDrawing("assembly has no bounding diagonal".to_string())
    })?;
    let scale = drawing::estimate_scale(diagonal, page.width, page.height)?;
    let (x, y) = drawing::iso_view_position(diagonal, page.height);
    debug!(%scale, x, y, "isometric view placed");

    let fields = drawing::fill_title_block(&editable, &DocumentInfo::from(&assembly), scale, date);
    fs::write(output, serde_json::to_string_pretty(&fields)?)?;
    info!(field_count = fields.len(), "title block written");
    Ok(fields)
}
