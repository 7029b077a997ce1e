use crate::error::Result;
use crate::io::Table;
use crate::model::{Row, TableCell};

/// [`Table`] kept entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    rows: Vec<Row>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from rows of plain values laid out from column 0.
    /// Empty strings are treated as missing cells, so rows stay sparse the
    /// same way rows read from a workbook are.
    pub fn from_values<R, I, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row_index, values)| {
                values
                    .into_iter()
                    .map(Into::into)
                    .enumerate()
                    .filter(|(_, value): &(usize, String)| !value.is_empty())
                    .map(|(column, value)| TableCell::with_row(row_index, column, value))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Rows currently held, header included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Cell values of every row, in stored cell order.
    pub fn to_values(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.value.clone()).collect())
            .collect()
    }
}

impl Table for MemoryTable {
    fn get_row(&mut self, row_index: usize) -> Result<Option<Row>> {
        Ok(self
            .rows
            .get(row_index)
            .filter(|row| row.iter().any(|cell| !cell.value.is_empty()))
            .cloned())
    }

    fn add_row(&mut self, cells: Row) -> Result<()> {
        self.rows.push(cells);
        Ok(())
    }

    fn save_and_close(self) -> Result<()> {
        Ok(())
    }
}
