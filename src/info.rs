//! Reading and editing the user-defined information attached to parts.
//!
//! Edits are staged in an [`InfoChanges`] value and applied in one
//! [`commit`]; callers re-read the part with [`read_info`] afterwards instead
//! of patching any view they hold.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::error::{Result, ToolError};
use crate::model::{MetadataRecord, Part, Property, is_reserved_key};

/// Returns every string property of `part` filed under the part information
/// group, in property order. Reserved keys never appear in the record.
pub fn read_info(part: &Part) -> MetadataRecord {
    part.properties
        .iter()
        .filter(|property| property.is_part_info() && !is_reserved_key(&property.name))
        .map(|property| (property.name.clone(), property.value.clone()))
        .collect()
}

/// Adds an empty information field for every required name the part lacks.
/// Returns the names that were added.
pub fn ensure_required(part: &mut Part, required: &[String]) -> Vec<String> {
    let mut added = Vec::new();
    for name in required {
        if part.property(name).is_none() {
            part.properties.push(Property::part_info(name.clone()));
            added.push(name.clone());
        }
    }
    added
}

/// Normalises a user-typed field name by removing all whitespace.
pub fn normalize_field_name(raw: &str) -> String {
    raw.split_whitespace().collect()
}

/// Adds a new, empty information field and returns its normalised name.
pub fn add_field(part: &mut Part, raw_name: &str) -> Result<String> {
    let name = normalize_field_name(raw_name);
    if name.is_empty() || is_reserved_key(&name) {
        return Err(ToolError::InvalidFieldName(raw_name.to_string()));
    }
    if part.property(&name).is_some() {
        return Err(ToolError::DuplicateField {
            part: part.id.clone(),
            field: name,
        });
    }
    part.properties.push(Property::part_info(name.clone()));
    Ok(name)
}

/// Turns `PartNumber` into `Part Number` for display.
pub fn display_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for ch in name.chars() {
        if ch.is_uppercase() && previous.is_some_and(|p| p.is_alphanumeric() || p == '_') {
            label.push(' ');
        }
        label.push(ch);
        previous = Some(ch);
    }
    label
}

/// Staged edits for the information fields of a single part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoChanges {
    /// New values keyed by field name.
    pub values: BTreeMap<String, String>,
    /// Deletion marks keyed by field name; only `true` entries are removed.
    pub delete: BTreeMap<String, bool>,
}

impl InfoChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn mark_for_deletion(mut self, field: impl Into<String>) -> Self {
        self.delete.insert(field.into(), true);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.delete.values().any(|marked| *marked)
    }
}

/// Parses a `key=value` assignment. The value may be empty or contain `=`.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ToolError::InvalidAssignment(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ToolError::InvalidAssignment(input.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Applies staged edits to `part`.
///
/// Every edit is validated before anything is written: values may only target
/// existing information fields, and required fields cannot be deleted. On
/// error the part is left untouched.
#[instrument(level = "debug", skip_all, fields(part = %part.id))]
pub fn commit(part: &mut Part, changes: &InfoChanges, required: &[String]) -> Result<()> {
    for field in changes.values.keys() {
        if !part.property(field).is_some_and(Property::is_part_info) {
            return Err(ToolError::UnknownField {
                part: part.id.clone(),
                field: field.clone(),
            });
        }
    }

    let doomed: Vec<&String> = changes
        .delete
        .iter()
        .filter(|(_, marked)| **marked)
        .map(|(field, _)| field)
        .collect();

    for field in &doomed {
        if required.contains(*field) {
            return Err(ToolError::ProtectedField {
                part: part.id.clone(),
                field: (*field).clone(),
            });
        }
        if !part.property(field).is_some_and(Property::is_part_info) {
            return Err(ToolError::UnknownField {
                part: part.id.clone(),
                field: (*field).clone(),
            });
        }
    }

    for (field, value) in &changes.values {
        part.set_info(field, value.clone());
    }
    part.properties
        .retain(|property| !(property.is_part_info() && doomed.contains(&&property.name)));

    debug!(
        updated = changes.values.len(),
        removed = doomed.len(),
        "part information committed"
    );
    Ok(())
}
