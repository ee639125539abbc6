use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::bom::{ColumnPolicy, DEFAULT_THRESHOLD, DEFAULT_TITLE};
use crate::error::{Result, ToolError};

/// Default worksheet name for generated BOMs.
pub const DEFAULT_SHEET_NAME: &str = "BOM";

/// Settings controlling how a BOM sheet is produced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BomConfig {
    /// Text of the merged title row.
    pub title: String,
    /// Name of the worksheet holding the BOM.
    pub sheet_name: String,
    /// Minimum share of parts defining a field for it to get a column.
    pub threshold: f64,
    /// When set, these fields become the dedicated columns instead of the
    /// threshold selection.
    pub required_fields: Option<Vec<String>>,
    /// Use the assembly's own required-field list as the dedicated columns
    /// when `required_fields` is not set.
    pub use_required_info: bool,
}

impl Default for BomConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            threshold: DEFAULT_THRESHOLD,
            required_fields: None,
            use_required_info: false,
        }
    }
}

impl BomConfig {
    /// Loads settings from a JSON file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        let config: BomConfig = serde_json::from_str(&source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ColumnPolicy::Threshold(self.threshold).validate()
    }

    /// The column policy these settings describe for an assembly whose
    /// required-field list is `model_required`.
    pub fn policy(&self, model_required: &[String]) -> ColumnPolicy {
        match &self.required_fields {
            Some(fields) => ColumnPolicy::Required(fields.clone()),
            None if self.use_required_info => ColumnPolicy::Required(model_required.to_vec()),
            None => ColumnPolicy::Threshold(self.threshold),
        }
    }
}
