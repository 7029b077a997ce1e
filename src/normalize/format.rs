//! Cell value formatting and manager list expansion.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Separator between manager names inside a hierarchy cell.
pub const MANAGER_DELIMITER: char = '|';

/// Number of leading input columns that are upper-cased by default.
pub const DEFAULT_UPPER_CASE_COLUMNS: usize = 9;

/// Column left verbatim among the leading columns by default.
pub const DEFAULT_VERBATIM_COLUMN: usize = 1;

/// How a cell value is rewritten before it is routed to an output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatPolicy {
    /// Upper-case the value, then trim surrounding whitespace.
    UpperTrim,
    /// Keep the value as read.
    Verbatim,
}

impl FormatPolicy {
    /// Returns `value` rewritten under this policy.
    pub fn apply(self, value: &str) -> String {
        match self {
            FormatPolicy::UpperTrim => value.to_uppercase().trim().to_string(),
            FormatPolicy::Verbatim => value.to_string(),
        }
    }
}

/// Declares the [`FormatPolicy`] of every input column.
///
/// A policy registered for a header title wins over one registered for the
/// column index, which wins over `default`. [`ColumnFormatting::default`]
/// upper-cases columns 0 and 2 through 8 and leaves the rest alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnFormatting {
    pub default: FormatPolicy,
    pub columns: BTreeMap<usize, FormatPolicy>,
    pub headers: HashMap<String, FormatPolicy>,
}

impl Default for ColumnFormatting {
    fn default() -> Self {
        let columns = (0..DEFAULT_UPPER_CASE_COLUMNS)
            .filter(|column| *column != DEFAULT_VERBATIM_COLUMN)
            .map(|column| (column, FormatPolicy::UpperTrim))
            .collect();

        Self {
            default: FormatPolicy::Verbatim,
            columns,
            headers: HashMap::new(),
        }
    }
}

impl ColumnFormatting {
    /// Formatting that keeps every value verbatim.
    pub fn verbatim() -> Self {
        Self {
            default: FormatPolicy::Verbatim,
            columns: BTreeMap::new(),
            headers: HashMap::new(),
        }
    }

    /// Registers a policy for an input column index.
    pub fn with_column(mut self, column: usize, policy: FormatPolicy) -> Self {
        self.columns.insert(column, policy);
        self
    }

    /// Registers a policy for every column carrying `title`.
    pub fn with_header(mut self, title: impl Into<String>, policy: FormatPolicy) -> Self {
        self.headers.insert(title.into(), policy);
        self
    }

    /// Policy for an input column, optionally identified by its header title.
    pub fn policy_for(&self, column: usize, title: Option<&str>) -> FormatPolicy {
        title
            .and_then(|title| self.headers.get(title))
            .or_else(|| self.columns.get(&column))
            .copied()
            .unwrap_or(self.default)
    }

    /// Formats a cell value read from `column`.
    pub fn format(&self, column: usize, title: Option<&str>, value: &str) -> String {
        self.policy_for(column, title).apply(value)
    }
}

/// Formats `value` read from input column `column` with the default rule:
/// upper-cased and trimmed when `column < 9` and `column != 1`, untouched
/// otherwise.
pub fn format_cell_value(column: usize, value: &str) -> String {
    if column < DEFAULT_UPPER_CASE_COLUMNS && column != DEFAULT_VERBATIM_COLUMN {
        FormatPolicy::UpperTrim.apply(value)
    } else {
        FormatPolicy::Verbatim.apply(value)
    }
}

/// Splits a hierarchy cell into manager names, dropping empty segments.
/// Segments are not trimmed.
pub fn split_managers(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(MANAGER_DELIMITER)
        .filter(|segment| !segment.is_empty())
}
