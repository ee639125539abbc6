use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that can occur while loading an assembly,
/// editing part information or emitting a bill of materials.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a sheet does not follow the BOM layout.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the commonality threshold lies outside `[0, 1]`.
    #[error("invalid commonality threshold {0}: expected a value between 0 and 1")]
    InvalidThreshold(f64),

    /// Raised when a part identifier does not resolve inside the assembly.
    #[error("no part with id '{0}' in the assembly")]
    UnknownPart(String),

    /// Raised when a new field name is empty or collides with a reserved key.
    #[error("invalid part information field name '{0}'")]
    InvalidFieldName(String),

    /// Raised when adding a field the part already carries.
    #[error("part '{part}' already has a field named '{field}'")]
    DuplicateField { part: String, field: String },

    /// Raised when trying to delete one of the assembly's required fields.
    #[error("field '{field}' of part '{part}' is required and cannot be removed")]
    ProtectedField { part: String, field: String },

    /// Raised when editing a field the part does not carry.
    #[error("part '{part}' has no information field named '{field}'")]
    UnknownField { part: String, field: String },

    /// Raised when a `key=value` assignment cannot be parsed.
    #[error("invalid assignment '{0}': expected key=value")]
    InvalidAssignment(String),

    /// Raised when drawing inputs cannot produce a sensible page layout.
    #[error("invalid drawing input: {0}")]
    InvalidDrawing(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
