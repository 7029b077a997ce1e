use std::fmt;
use std::path::{Path, PathBuf};

use calamine::{DataType, Range, Reader, Sheets, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use tracing::{debug, instrument};

use crate::error::{Result, ToolError};
use crate::io::Table;
use crate::model::address::MAX_COLUMN_INDEX;
use crate::model::{Row, TableCell, column_index_to_name};

/// Name given to the worksheet of workbooks written by this tool.
pub const SHEET_NAME: &str = "Sheet1";

/// [`Table`] backed by the first worksheet of a spreadsheet file.
///
/// Existing rows are loaded through calamine when the table is opened, so any
/// format calamine recognizes (`.xlsx`, `.xls`, `.xlsb`, `.ods`) can be read.
/// Added rows go straight into a rust_xlsxwriter worksheet and are only
/// readable again once the table has been saved and reopened; the file is
/// always written as `.xlsx`.
pub struct XlsxTable {
    path: PathBuf,
    rows: Vec<Row>,
    writer: Option<Workbook>,
    next_row: u32,
}

impl XlsxTable {
    /// Opens an existing workbook and loads its first worksheet.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook: Sheets<_> = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no worksheet".into()))?
            .map_err(ToolError::from)?;

        let rows = read_rows(&range);
        debug!(row_count = rows.len(), "worksheet loaded");

        Ok(Self {
            path: path.to_path_buf(),
            next_row: rows.len() as u32,
            rows,
            writer: None,
        })
    }

    /// Starts an empty table that will be written to `path` on save.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            rows: Vec::new(),
            writer: Some(start_workbook(&[])?),
            next_row: 0,
        })
    }
}

impl fmt::Debug for XlsxTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XlsxTable")
            .field("path", &self.path)
            .field("loaded_rows", &self.rows.len())
            .field("next_row", &self.next_row)
            .field("modified", &self.writer.is_some())
            .finish()
    }
}

impl Table for XlsxTable {
    fn get_row(&mut self, row_index: usize) -> Result<Option<Row>> {
        Ok(self
            .rows
            .get(row_index)
            .filter(|row| !row.is_empty())
            .cloned())
    }

    fn add_row(&mut self, cells: Row) -> Result<()> {
        if let Some(cell) = cells.iter().find(|cell| cell.column > MAX_COLUMN_INDEX) {
            return Err(ToolError::ColumnOutOfRange(column_index_to_name(cell.column)));
        }

        // Appending to an opened table rewrites its loaded rows first.
        let workbook = match self.writer.take() {
            Some(workbook) => workbook,
            None => start_workbook(&self.rows)?,
        };
        let workbook = self.writer.insert(workbook);

        let worksheet = workbook.worksheet_from_index(0)?;
        for cell in &cells {
            worksheet.write_string(self.next_row, cell.column as u16, &cell.value)?;
        }
        self.next_row += 1;
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    fn save_and_close(self) -> Result<()> {
        let Some(mut workbook) = self.writer else {
            debug!("table unchanged; nothing to save");
            return Ok(());
        };

        workbook.save(&self.path)?;
        debug!(row_count = self.next_row, "workbook saved");
        Ok(())
    }
}

/// Creates a single-sheet workbook holding `rows`.
fn start_workbook(rows: &[Row]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row_idx, row) in rows.iter().enumerate() {
        for cell in row {
            worksheet.write_string(row_idx as u32, cell.column as u16, &cell.value)?;
        }
    }

    Ok(workbook)
}

/// Materialises the used range as sparse rows with absolute coordinates.
/// Rows above the range start are kept as empty rows.
fn read_rows(range: &Range<DataType>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);

    let mut rows: Vec<Row> = vec![Vec::new(); start_row];
    for (offset, cells) in range.rows().enumerate() {
        let row_index = start_row + offset;
        let row = cells
            .iter()
            .enumerate()
            .filter_map(|(col_offset, cell)| {
                let value = cell_to_string(cell);
                (!value.is_empty())
                    .then(|| TableCell::with_row(row_index, start_col + col_offset, value))
            })
            .collect();
        rows.push(row);
    }
    rows
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
