//! Tally History Store
//!
//! Durable, ordered log of past calculations kept in a CSV file with the
//! fixed header `operation,x,y,result`.
//!
//! Loading is fail-fast: a wrong header, a row with the wrong number of
//! fields or an unparsable number fails the whole load with
//! `HistoryError::Corrupt` instead of skipping the row.

mod error;
mod record;
mod store;

pub use error::HistoryError;
pub use record::{History, HistoryRecord, COLUMNS};
pub use store::{DeleteOutcome, HistoryStore, HistoryView, DEFAULT_HISTORY_FILE};
