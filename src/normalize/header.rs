use std::collections::{HashMap, HashSet};

use crate::error::{Result, ToolError};
use crate::model::{ManagerLevel, Row, TableCell};

/// Column layout derived once from the input header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderClassification {
    titles: Vec<String>,
    account_columns: HashMap<String, usize>,
    account_titles: Vec<String>,
}

impl HeaderClassification {
    /// Classifies the header row. Titles are read from column 0 up to the
    /// first missing or empty cell.
    pub fn classify(header: &[TableCell]) -> Result<Self> {
        let by_column: HashMap<usize, &str> = header
            .iter()
            .map(|cell| (cell.column, cell.value.as_str()))
            .collect();

        let titles = (0..)
            .map_while(|column| by_column.get(&column).filter(|title| !title.is_empty()))
            .map(|title| title.to_string());

        Self::from_titles(titles)
    }

    /// Classifies an ordered list of header titles.
    pub fn from_titles<I, S>(titles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        if titles.is_empty() {
            return Err(ToolError::MalformedHeader(
                "header row has no column titles".into(),
            ));
        }
        if let Some(level) = ManagerLevel::from_title(&titles[0]) {
            return Err(ToolError::MalformedHeader(format!(
                "first column must hold the account id, found manager column '{}'",
                level.title()
            )));
        }

        let mut account_columns = HashMap::new();
        let mut account_titles = Vec::new();
        let mut seen = HashSet::with_capacity(titles.len());

        for title in &titles {
            if !seen.insert(title.as_str()) {
                return Err(ToolError::DuplicateHeader(title.clone()));
            }

            if ManagerLevel::from_title(title).is_none() {
                account_columns.insert(title.clone(), account_titles.len());
                account_titles.push(title.clone());
            }
        }

        Ok(Self {
            titles,
            account_columns,
            account_titles,
        })
    }

    /// Number of input columns covered by the header.
    pub fn width(&self) -> usize {
        self.titles.len()
    }

    /// Title of an input column, if the header covers it.
    pub fn title(&self, column: usize) -> Option<&str> {
        self.titles.get(column).map(String::as_str)
    }

    /// Whether `title` is one of the recognized manager-hierarchy titles.
    pub fn is_manager_header(&self, title: &str) -> bool {
        ManagerLevel::from_title(title).is_some()
    }

    /// Account table column assigned to an attribute title.
    pub fn account_column(&self, title: &str) -> Option<usize> {
        self.account_columns.get(title).copied()
    }

    /// Attribute titles in their original relative order.
    pub fn account_titles(&self) -> &[String] {
        &self.account_titles
    }

    /// Header row for the account table.
    pub fn account_header(&self) -> Row {
        self.account_titles
            .iter()
            .enumerate()
            .map(|(column, title)| TableCell::new(column, title.clone()))
            .collect()
    }
}
