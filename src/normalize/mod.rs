//! Decomposition of the wide account sheet into account, manager, and
//! relation tables.
//!
//! The input is scanned once, top to bottom. Row 0 is classified by
//! [`HeaderClassification`]; every following row is formatted with
//! [`ColumnFormatting`], its manager-hierarchy cells are expanded into
//! relations, and its remaining cells become one account row.

pub mod format;
pub mod header;

use std::collections::HashSet;

use tracing::{debug, info, instrument, trace};

use crate::error::{Result, ToolError};
use crate::io::Table;
use crate::model::{
    CellReference, NormalizationSummary, Relation, RelationType, Row, TableCell, row_from_values,
};

pub use format::{ColumnFormatting, FormatPolicy, format_cell_value, split_managers};
pub use header::HeaderClassification;

/// Only column of the manager table.
pub const MANAGER_TABLE_HEADER: &str = "Manager";

/// Columns of the relation table.
pub const RELATION_TABLE_HEADER: [&str; 3] = ["id", "Manager", "Type"];

/// Splits an account sheet into its three normalized tables.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    formatting: ColumnFormatting,
}

impl Normalizer {
    pub fn new(formatting: ColumnFormatting) -> Self {
        Self { formatting }
    }

    /// Reads `initial` from its header row and appends the account, manager,
    /// and relation rows to the output tables. The scan ends at the first
    /// absent row or the first row whose column 0 is empty.
    ///
    /// Nothing is written when the header is missing or malformed. Any other
    /// failure aborts the run and leaves whatever was already appended in
    /// place; rows are appended only once they have been fully processed.
    #[instrument(level = "info", skip_all)]
    pub fn normalize<I, A, M, R>(
        &self,
        initial: &mut I,
        accounts: &mut A,
        managers: &mut M,
        relations: &mut R,
    ) -> Result<NormalizationSummary>
    where
        I: Table,
        A: Table,
        M: Table,
        R: Table,
    {
        let header = initial
            .get_row(0)?
            .ok_or_else(|| ToolError::MalformedHeader("input table has no header row".into()))?;
        let classification = HeaderClassification::classify(&header)?;
        debug!(
            columns = classification.width(),
            account_columns = classification.account_titles().len(),
            "header classified"
        );

        accounts.add_row(classification.account_header())?;
        managers.add_row(row_from_values([MANAGER_TABLE_HEADER]))?;
        relations.add_row(row_from_values(RELATION_TABLE_HEADER))?;

        let mut run = Run::new(&classification, &self.formatting);
        for row in initial.rows_from(1) {
            let (row_index, cells) = row?;
            let Some(account_id) = row_account_id(&cells) else {
                debug!(row_index, "row without account id ends the input");
                break;
            };
            let output = run.process_row(row_index, account_id, &cells)?;

            for manager in output.new_managers {
                managers.add_row(vec![TableCell::new(0, manager)])?;
            }
            for relation in output.relations {
                relations.add_row(relation.into_cells())?;
            }
            accounts.add_row(output.account_row)?;
        }

        let summary = run.finish();
        info!(
            accounts = summary.accounts,
            managers = summary.managers,
            relations = summary.relations,
            "normalization finished"
        );
        Ok(summary)
    }
}

/// Raw value of the column 0 cell, unless it is missing or empty.
fn row_account_id(cells: &[TableCell]) -> Option<&str> {
    cells
        .iter()
        .find(|cell| cell.column == 0)
        .map(|cell| cell.value.as_str())
        .filter(|value| !value.is_empty())
}

/// Rows produced by one input row, appended together.
#[derive(Debug, Default)]
struct RowOutput {
    account_row: Row,
    new_managers: Vec<String>,
    relations: Vec<Relation>,
}

/// State owned by a single normalization run.
struct Run<'a> {
    classification: &'a HeaderClassification,
    formatting: &'a ColumnFormatting,
    known_managers: HashSet<String>,
    summary: NormalizationSummary,
}

impl<'a> Run<'a> {
    fn new(classification: &'a HeaderClassification, formatting: &'a ColumnFormatting) -> Self {
        Self {
            classification,
            formatting,
            known_managers: HashSet::new(),
            summary: NormalizationSummary::default(),
        }
    }

    fn process_row(
        &mut self,
        row_index: usize,
        account_id: &str,
        cells: &[TableCell],
    ) -> Result<RowOutput> {
        trace!(row_index, account_id, "processing row");

        let mut output = RowOutput::default();
        for cell in cells {
            let Some(title) = self.classification.title(cell.column) else {
                debug!(
                    cell = %CellReference::new(row_index, cell.column),
                    "cell outside the header width ignored"
                );
                continue;
            };
            let value = self.formatting.format(cell.column, Some(title), &cell.value);

            if self.classification.is_manager_header(title) {
                let relation_type = RelationType::for_header(title);
                for manager in split_managers(&value) {
                    if self.known_managers.insert(manager.to_string()) {
                        output.new_managers.push(manager.to_string());
                    }
                    output.relations.push(Relation {
                        account_id: account_id.to_string(),
                        manager: manager.to_string(),
                        relation_type,
                    });
                }
            } else {
                let column = self.classification.account_column(title).ok_or_else(|| {
                    ToolError::UnknownColumn {
                        title: title.to_string(),
                        cell: CellReference::new(row_index, cell.column).to_string(),
                    }
                })?;
                output.account_row.push(TableCell::new(column, value));
            }
        }

        self.summary.accounts += 1;
        self.summary.managers += output.new_managers.len();
        for relation in &output.relations {
            self.summary.record_relation(relation.relation_type);
        }
        Ok(output)
    }

    fn finish(self) -> NormalizationSummary {
        self.summary
    }
}
