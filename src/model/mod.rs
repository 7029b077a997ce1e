use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

pub mod address;

pub use address::{CellReference, column_index_to_name, column_name_to_index};

/// A single cell value addressed by its 0-based column. The row index is only
/// populated by stores that read rows out of a sparse grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// 0-based column index.
    pub column: usize,
    /// Plain string value of the cell.
    pub value: String,
    /// 0-based row index when known.
    pub row: Option<usize>,
}

impl TableCell {
    /// Creates a cell for the given column.
    pub fn new(column: usize, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
            row: None,
        }
    }

    /// Creates a cell that remembers the row it was read from.
    pub fn with_row(row: usize, column: usize, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
            row: Some(row),
        }
    }
}

/// Ordered cells of one table row. Column indices are ascending but need not
/// be contiguous.
pub type Row = Vec<TableCell>;

/// Builds a contiguous row starting at column 0.
pub fn row_from_values<I, S>(values: I) -> Row
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(column, value)| TableCell::new(column, value))
        .collect()
}

/// The manager-hierarchy columns recognized in the input header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ManagerLevel {
    District,
    Region,
    Area,
    Division,
}

impl ManagerLevel {
    /// Every recognized level, in hierarchy order.
    pub const ALL: [ManagerLevel; 4] = [
        ManagerLevel::District,
        ManagerLevel::Region,
        ManagerLevel::Area,
        ManagerLevel::Division,
    ];

    /// Header title that marks a column as holding managers of this level.
    pub fn title(self) -> &'static str {
        match self {
            ManagerLevel::District => "__l9district_mgrs",
            ManagerLevel::Region => "__l9region_vps",
            ManagerLevel::Area => "__l9area_vps",
            ManagerLevel::Division => "__l9division",
        }
    }

    /// Resolves a header title. Matching is exact: no case folding, no trimming.
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.title() == title)
    }

    /// Relation tag written for managers found in this column.
    pub fn relation_type(self) -> RelationType {
        match self {
            ManagerLevel::District => RelationType::District,
            ManagerLevel::Region => RelationType::Region,
            ManagerLevel::Area => RelationType::Area,
            ManagerLevel::Division => RelationType::Division,
        }
    }
}

/// Tag stored in the relation table's `Type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RelationType {
    District,
    Region,
    Area,
    Division,
    Undefined,
}

impl RelationType {
    /// Looks up the relation tag for a manager header title, falling back to
    /// [`RelationType::Undefined`] for titles outside the recognized set.
    pub fn for_header(title: &str) -> Self {
        match ManagerLevel::from_title(title) {
            Some(level) => level.relation_type(),
            None => {
                warn!(title, "manager column has no known relation type; tagging as Undefined");
                RelationType::Undefined
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::District => "District",
            RelationType::Region => "Region",
            RelationType::Area => "Area",
            RelationType::Division => "Division",
            RelationType::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One account → manager assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub account_id: String,
    pub manager: String,
    pub relation_type: RelationType,
}

impl Relation {
    /// Cells of the relation table row: id, manager, type.
    pub fn into_cells(self) -> Row {
        vec![
            TableCell::new(0, self.account_id),
            TableCell::new(1, self.manager),
            TableCell::new(2, self.relation_type.as_str()),
        ]
    }
}

/// Counters describing what a normalization run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationSummary {
    /// Account rows written (header excluded).
    pub accounts: usize,
    /// Distinct managers written (header excluded).
    pub managers: usize,
    /// Relation rows written (header excluded).
    pub relations: usize,
    /// Relation rows per tag.
    pub relations_by_type: BTreeMap<RelationType, usize>,
}

impl NormalizationSummary {
    pub(crate) fn record_relation(&mut self, relation_type: RelationType) {
        self.relations += 1;
        *self.relations_by_type.entry(relation_type).or_default() += 1;
    }
}
