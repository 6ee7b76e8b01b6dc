//! History records and the in-memory history

use serde::{Deserialize, Serialize};
use std::fmt;
use tally_core::Number;

/// Column names of the history file, in on-disk order
pub const COLUMNS: [&str; 4] = ["operation", "x", "y", "result"];

/// One past calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub operation: String,
    pub x: Number,
    /// Absent for single-input operations
    pub y: Option<Number>,
    pub result: Number,
}

impl HistoryRecord {
    pub fn new(operation: impl Into<String>, x: Number, y: Option<Number>, result: Number) -> Self {
        Self { operation: operation.into(), x, y, result }
    }

    pub fn is_single_input(&self) -> bool {
        self.y.is_none()
    }

    fn cells(&self) -> [String; 4] {
        [
            self.operation.clone(),
            self.x.to_string(),
            self.y.as_ref().map(ToString::to_string).unwrap_or_default(),
            self.result.to_string(),
        ]
    }
}

/// Ordered sequence of records, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    /// Schema columns; present even when there are no records
    pub fn columns(&self) -> &'static [&'static str; 4] {
        &COLUMNS
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub(crate) fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Drop every record for `operation`, returning how many were removed
    pub(crate) fn remove_operation(&mut self, operation: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.operation != operation);
        before - self.records.len()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryRecord;
    type IntoIter = std::slice::Iter<'a, HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Aligned table with an index column, one row per record
impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 4]> = self.records.iter().map(HistoryRecord::cells).collect();

        let index_width = self.records.len().saturating_sub(1).to_string().len();
        let mut widths = COLUMNS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        write!(f, "{:>iw$}", "", iw = index_width)?;
        for (name, width) in COLUMNS.iter().zip(widths) {
            write!(f, "  {:>w$}", name, w = width)?;
        }
        for (i, row) in rows.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:>iw$}", i, iw = index_width)?;
            for (cell, width) in row.iter().zip(widths) {
                write!(f, "  {:>w$}", cell, w = width)?;
            }
        }
        Ok(())
    }
}
