//! Tabular search results
//!
//! A [`ResultTable`] always carries the full column set from
//! [`crate::columns::COLUMNS`], whether it holds one page, many pages, or no rows.

use serde::Serialize;
use serde_json::Value;

use crate::columns::{column_names, parse_series, COLUMNS};

/// A single table row; `None` marks a field the API did not provide.
pub type Row = Vec<Option<String>>;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResultTable {
    /// A table with the fixed column set and no rows
    pub fn empty() -> Self {
        ResultTable {
            columns: column_names(),
            rows: Vec::new(),
        }
    }

    /// Build one page table from the records of a single API response.
    ///
    /// Values are extracted column by column and then transposed into rows,
    /// keeping the API's record order.
    pub fn from_records(records: &[Value]) -> Self {
        let series: Vec<Vec<Option<String>>> = COLUMNS
            .iter()
            .map(|column| parse_series(records, column))
            .collect();

        let rows = (0..records.len())
            .map(|i| series.iter().map(|values| values[i].clone()).collect())
            .collect();

        ResultTable {
            columns: column_names(),
            rows,
        }
    }

    /// Concatenate page tables in order.
    pub fn concat(pages: Vec<ResultTable>) -> Self {
        let mut table = ResultTable::empty();
        for page in pages {
            table.rows.extend(page.rows);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`, if both exist and the field was provided
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }
}
