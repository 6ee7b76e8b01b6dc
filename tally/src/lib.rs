//! Tally
//!
//! Interactive calculator session: basic arithmetic, persistent history
//! and plugin-provided advanced features behind a numbered menu.

mod config;
mod repl;

pub use config::{Config, HISTORY_FILE_ENV, PLUGIN_DIR_ENV};
pub use repl::{Calculator, Flow, PROMPT};
