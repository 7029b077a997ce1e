//! Row-oriented storage behind the normalizer.
//!
//! A [`Table`] hands out rows one index at a time and appends rows after the
//! ones it already holds. [`MemoryTable`] keeps everything in memory, while
//! [`XlsxTable`] is backed by the first worksheet of an `.xlsx` workbook.

pub mod excel;
pub mod memory;

pub use excel::XlsxTable;
pub use memory::MemoryTable;

use crate::error::Result;
use crate::model::Row;

/// Storage contract shared by the input table and the three output tables.
pub trait Table {
    /// Returns the row at `row_index` (0-based, row 0 is the header), or
    /// `None` once the table has no row there. A row carrying no non-empty
    /// cell is reported as absent.
    fn get_row(&mut self, row_index: usize) -> Result<Option<Row>>;

    /// Appends a row after every row the table already holds.
    fn add_row(&mut self, cells: Row) -> Result<()>;

    /// Flushes pending rows to the backing store and releases it.
    fn save_and_close(self) -> Result<()>
    where
        Self: Sized;

    /// Iterates rows from `start` until the first absent row.
    fn rows_from(&mut self, start: usize) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows {
            table: self,
            next: start,
            finished: false,
        }
    }
}

/// Lazy, finite sequence of `(row_index, row)` pairs read from a [`Table`].
///
/// The sequence stops at the first absent row and after the first error; it
/// cannot be restarted.
pub struct Rows<'a, T> {
    table: &'a mut T,
    next: usize,
    finished: bool,
}

impl<T: Table> Iterator for Rows<'_, T> {
    type Item = Result<(usize, Row)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.table.get_row(self.next) {
            Ok(Some(row)) => {
                let index = self.next;
                self.next += 1;
                Some(Ok((index, row)))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<T: Table> std::iter::FusedIterator for Rows<'_, T> {}
