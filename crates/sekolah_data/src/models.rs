//! Table and record models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One data row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    /// Build a record by zipping header names with row values.
    ///
    /// Missing trailing values become empty strings and extra values are
    /// dropped, so every header column is always present.
    pub fn from_row<'a, I>(headers: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = values.into_iter();
        let values = headers
            .iter()
            .map(|header| {
                let value = values.next().unwrap_or_default();
                (header.clone(), value.to_string())
            })
            .collect();

        Self { values }
    }

    /// Raw value of a column, `None` when the column is not in the header.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Whitespace-trimmed value of a column, empty when absent.
    pub fn trimmed(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or_default()
    }

    /// True when the column is absent or blank after trimming.
    pub fn is_blank(&self, column: &str) -> bool {
        self.trimmed(column).is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Statistics gathered while loading a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Rows whose field count differed from the header.
    pub ragged_rows: usize,
    /// Rows that could not be decoded at all.
    pub skipped_rows: usize,
}

/// An ordered, immutable collection of records sharing one header.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
    pub stats: LoadStats,
}

impl Table {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            headers,
            records,
            stats: LoadStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: LoadStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Columns from `required` that are not in the header, in input order.
    pub fn missing_columns<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|col| !self.has_column(col))
            .map(String::as_str)
            .collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
