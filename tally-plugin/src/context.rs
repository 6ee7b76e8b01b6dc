//! Plugin Context

use crate::ExecuteError;
use std::fmt::Display;
use std::io::{BufRead, Write};
use tally_history::HistoryStore;

/// Session handed to a plugin while it runs
pub struct PluginContext<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    history: &'a HistoryStore,
}

impl<'a> PluginContext<'a> {
    pub fn new(
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        history: &'a HistoryStore,
    ) -> Self {
        Self { input, output, history }
    }

    pub fn history(&self) -> &HistoryStore {
        self.history
    }

    /// Write one line to the session output
    pub fn say(&mut self, line: impl Display) -> Result<(), ExecuteError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Show `text` and read the user's answer, trimmed
    pub fn prompt(&mut self, text: &str) -> Result<String, ExecuteError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExecuteError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }
}
