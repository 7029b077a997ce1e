//! A1-style addressing: base-26 column letters and 1-based row numbers.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToolError};

/// Last column index a worksheet can address (`XFD`).
pub const MAX_COLUMN_INDEX: usize = 16_383;

/// Converts a 0-based column index into its letter name (`0 -> "A"`,
/// `26 -> "AA"`).
pub fn column_index_to_name(index: usize) -> String {
    let mut remaining = index as u64 + 1;
    let mut letters = Vec::new();
    while remaining > 0 {
        let rem = ((remaining - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Converts a column name such as `"AB"` back into its 0-based index.
/// Lowercase letters are accepted.
pub fn column_name_to_index(name: &str) -> Result<usize> {
    if name.is_empty() {
        return Err(ToolError::InvalidCellReference(name.to_string()));
    }

    let mut index: usize = 0;
    for ch in name.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(ToolError::InvalidCellReference(name.to_string()));
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index
            .checked_mul(26)
            .and_then(|value| value.checked_add(digit))
            .ok_or_else(|| ToolError::InvalidCellReference(name.to_string()))?;
    }
    Ok(index - 1)
}

/// 0-based cell coordinates rendered as `C4` style references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellReference {
    pub row: usize,
    pub column: usize,
}

impl CellReference {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_name(self.column), self.row + 1)
    }
}

impl FromStr for CellReference {
    type Err = ToolError;

    fn from_str(reference: &str) -> Result<Self> {
        let invalid = || ToolError::InvalidCellReference(reference.to_string());

        let split = reference
            .find(|ch: char| ch.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = reference.split_at(split);

        let column = column_name_to_index(letters).map_err(|_| invalid())?;
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self {
            row: row - 1,
            column,
        })
    }
}
