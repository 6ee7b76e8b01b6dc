//! CSV-backed history store
//!
//! Every mutation is a full cycle: load the whole file, change the records
//! in memory, rewrite the whole file. The rewrite goes through a sibling
//! temporary file that is renamed over the target.

use crate::{History, HistoryError, HistoryRecord, COLUMNS};
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tally_core::{Number, Value};
use tracing::debug;

/// Default location of the history file, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "data/history.csv";

/// What `delete_by_operation` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// This many records were removed and the file rewritten
    Removed(usize),
    /// No record had that operation; the file was not touched
    NoMatch,
}

/// History as presented to the user
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    Empty,
    Entries(History),
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full history. A missing or zero-length file is an empty
    /// history; anything that does not follow the schema fails the load.
    pub fn load(&self) -> Result<History, HistoryError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "history file not found, starting empty");
                return Ok(History::new());
            }
            Err(e) => return Err(e.into()),
        };

        if file.metadata()?.len() == 0 {
            debug!(path = %self.path.display(), "history file is empty");
            return Ok(History::new());
        }

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers().map_err(|e| self.read_error(e))?;
        if !headers.iter().eq(COLUMNS.iter().copied()) {
            return Err(HistoryError::Corrupt {
                path: self.path.clone(),
                line: 1,
                reason: format!(
                    "expected header {:?}, found {:?}",
                    COLUMNS.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            });
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<HistoryRecord>() {
            records.push(row.map_err(|e| self.read_error(e))?);
        }

        debug!(path = %self.path.display(), records = records.len(), "history loaded");
        Ok(History::from_records(records))
    }

    /// Append one record and rewrite the file. `result` must be a number,
    /// or text that parses as one; anything else is `InvalidResult`.
    /// `NaN` is refused in every column since it cannot be read back.
    pub fn save(
        &self,
        operation: &str,
        x: impl Into<Number>,
        y: Option<Number>,
        result: impl Into<Value>,
    ) -> Result<HistoryRecord, HistoryError> {
        let result = validate_result(result.into())?;
        let x: Number = x.into();
        reject_nan("x", &x)?;
        if let Some(y) = &y {
            reject_nan("y", y)?;
        }
        let record = HistoryRecord::new(operation, x, y, result);

        let mut history = self.load()?;
        debug!(
            operation = %record.operation,
            x = %record.x,
            y = ?record.y.as_ref().map(ToString::to_string),
            result = %record.result,
            "saving history record"
        );
        history.push(record.clone());
        self.write(&history)?;
        Ok(record)
    }

    /// `save` for one-operand operations; `y` is recorded as absent
    pub fn save_single(
        &self,
        operation: &str,
        x: impl Into<Number>,
        result: impl Into<Value>,
    ) -> Result<HistoryRecord, HistoryError> {
        self.save(operation, x, None, result)
    }

    /// Rewrite the file with the header row only
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.write(&History::new())?;
        debug!(path = %self.path.display(), "history cleared");
        Ok(())
    }

    pub fn delete_all(&self) -> Result<(), HistoryError> {
        self.clear()
    }

    pub fn delete_by_operation(&self, operation: &str) -> Result<DeleteOutcome, HistoryError> {
        let mut history = self.load()?;
        let removed = history.remove_operation(operation);
        if removed == 0 {
            debug!(operation, "no history records matched");
            return Ok(DeleteOutcome::NoMatch);
        }

        self.write(&history)?;
        debug!(operation, removed, "history records deleted");
        Ok(DeleteOutcome::Removed(removed))
    }

    pub fn list(&self) -> Result<HistoryView, HistoryError> {
        let history = self.load()?;
        if history.is_empty() {
            Ok(HistoryView::Empty)
        } else {
            Ok(HistoryView::Entries(history))
        }
    }

    fn write(&self, history: &History) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(dir = %parent.display(), "creating history directory");
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(COLUMNS)?;
        for record in history {
            writer.serialize(record)?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("history"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_error(&self, err: csv::Error) -> HistoryError {
        if err.is_io_error() {
            return HistoryError::Csv(err);
        }
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        HistoryError::Corrupt {
            path: self.path.clone(),
            line,
            reason: err.to_string(),
        }
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

fn validate_result(result: Value) -> Result<Number, HistoryError> {
    let number = match result {
        Value::Number(n) => n,
        Value::Text(s) => s.parse::<Number>().map_err(|_| {
            HistoryError::invalid_result(format!("result {:?} is not numeric", s))
        })?,
        Value::Null => return Err(HistoryError::invalid_result("result is missing")),
    };
    reject_nan("result", &number)?;
    Ok(number)
}

fn reject_nan(column: &str, number: &Number) -> Result<(), HistoryError> {
    match number {
        Number::Real(f) | Number::Imaginary(f) if f.is_nan() => {
            Err(HistoryError::invalid_result(format!("{} is NaN", column)))
        }
        _ => Ok(()),
    }
}
