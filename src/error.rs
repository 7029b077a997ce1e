use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads the account sheet, normalizes it, or writes the output tables.
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

    /// Errors bubbled up from the spreadsheet reader, including unsupported
    /// file formats.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when a workbook does not contain a usable worksheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the header row is missing or cannot describe the accounts.
    #[error("malformed header row: {0}")]
    MalformedHeader(String),

    /// Raised when two header cells carry the same title.
    #[error("duplicate header title '{0}'")]
    DuplicateHeader(String),

    /// Raised when a data cell refers to an attribute column that has no
    /// account table column.
    #[error("no account column for header '{title}' (cell {cell})")]
    UnknownColumn { title: String, cell: String },

    /// Raised when an A1-style reference cannot be parsed.
    #[error("invalid cell reference '{0}'")]
    InvalidCellReference(String),

    /// Raised when a cell is written past the last addressable column.
    #[error("column {0} is outside the worksheet")]
    ColumnOutOfRange(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when an output file already exists and overwriting was not requested.
    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
