use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::error::{Result, ToolError};
use crate::model::Assembly;

/// Loads an assembly document from JSON.
///
/// Links without an identifier receive a stable surrogate derived from their
/// target and position, so repeated loads of the same file agree.
pub fn read_assembly(path: &Path) -> Result<Assembly> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    parse_assembly(&source)
}

/// Parses an assembly document from a JSON string.
pub fn parse_assembly(source: &str) -> Result<Assembly> {
    let mut assembly: Assembly = serde_json::from_str(source)?;
    for (position, link) in assembly.links.iter_mut().enumerate() {
        if link.id.is_empty() {
            link.id = generate_surrogate_id(&link.linked, position);
        }
    }
    Ok(assembly)
}

/// Writes the assembly back as pretty-printed JSON.
pub fn write_assembly(path: &Path, assembly: &Assembly) -> Result<()> {
    let json = serde_json::to_string_pretty(assembly)?;
    fs::write(path, json)?;
    Ok(())
}

fn generate_surrogate_id(linked: &str, position: usize) -> String {
    let canonical = format!("{linked}#{position}");
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, canonical.as_bytes());
    format!("urn:uuid:{uuid}")
}
