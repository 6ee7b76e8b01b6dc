//! Menu-driven calculator session
//!
//! The session runs over any `BufRead`/`Write` pair so it can be driven
//! from a terminal or from a test. Every failure short of an I/O error on
//! the session itself is reported as text and the menu is shown again.

use std::io::{self, BufRead, Write};
use tally_core::arithmetic::parse_operands;
use tally_core::{format_real, Number, Operation};
use tally_history::{DeleteOutcome, HistoryStore, HistoryView};
use tally_plugin::{Discovery, PluginContext, PluginRegistry};
use tracing::{debug, info};

use crate::Config;

pub const PROMPT: &str = "calc> ";

/// Whether the session keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Calculator<R, W> {
    input: R,
    output: W,
    history: HistoryStore,
    registry: PluginRegistry,
}

impl<R: BufRead, W: Write> Calculator<R, W> {
    /// Session with the standard plugins and the configured locations
    pub fn new(config: &Config, input: R, output: W) -> Self {
        let registry =
            tally_std::standard_registry().with_discovery(Discovery::new(&config.plugin_dir));
        Self::with_parts(HistoryStore::new(&config.history_file), registry, input, output)
    }

    pub fn with_parts(history: HistoryStore, registry: PluginRegistry, input: R, output: W) -> Self {
        Self { input, output, history, registry }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu and handle commands until exit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        info!(history = %self.history.path().display(), "session started");
        self.display_menu()?;

        loop {
            let Some(line) = self.read_answer(PROMPT)? else {
                writeln!(self.output)?;
                break;
            };
            if self.handle_choice(&line)? == Flow::Exit {
                break;
            }
        }

        info!("session ended");
        Ok(())
    }

    pub fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Welcome to the Tally Calculator!")?;
        writeln!(self.output)?;
        writeln!(self.output, "Select an option from the menu below:")?;
        writeln!(self.output, "1. Basic Arithmetic Operations")?;
        writeln!(self.output, "2. View History")?;
        writeln!(self.output, "3. Advanced Features")?;
        writeln!(self.output, "4. Clear History")?;
        writeln!(self.output, "5. Delete History")?;
        writeln!(self.output, "6. Exit")?;
        writeln!(self.output)
    }

    /// Handle one line typed at the main prompt. Besides the menu numbers
    /// this accepts `<operation> x y` (e.g. `add 5 3`) and `exit`.
    pub fn handle_choice(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim();
        debug!(choice = line, "menu choice");

        match line {
            "" => return Ok(Flow::Continue),
            "1" => self.arithmetic_menu()?,
            "2" => self.view_history()?,
            "3" => self.advanced_features()?,
            "4" => self.clear_history()?,
            "5" => self.delete_history_prompt()?,
            "6" | "exit" | "quit" => {
                writeln!(self.output, "Exiting calculator... Thank you!")?;
                return Ok(Flow::Exit);
            }
            _ => {
                let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
                match Operation::from_name(command) {
                    Some(op) => self.do_arithmetic(op, rest)?,
                    None => writeln!(self.output, "Invalid choice, please select a valid option.")?,
                }
            }
        }

        self.display_menu()?;
        Ok(Flow::Continue)
    }

    fn arithmetic_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Select an arithmetic operation:")?;
        for (i, op) in Operation::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, capitalize(op.name()))?;
        }
        writeln!(self.output, "5. Back to Main Menu")?;

        let Some(choice) = self.read_answer("Choose an operation (1-5): ")? else {
            return Ok(());
        };
        let op = match choice.as_str() {
            "1" => Operation::Add,
            "2" => Operation::Subtract,
            "3" => Operation::Multiply,
            "4" => Operation::Divide,
            "5" => return Ok(()),
            _ => {
                return writeln!(self.output, "Invalid choice, going back to main menu.");
            }
        };

        match self.read_answer("Enter two numbers separated by space: ")? {
            Some(operands) => self.do_arithmetic(op, &operands),
            None => Ok(()),
        }
    }

    /// Compute `op` over the two numbers in `operands`, print and record it
    pub fn do_arithmetic(&mut self, op: Operation, operands: &str) -> io::Result<()> {
        let outcome = parse_operands(operands).and_then(|(x, y)| Ok((x, y, op.apply(x, y)?)));
        let (x, y, result) = match outcome {
            Ok(values) => values,
            Err(e) => return writeln!(self.output, "Error: {}", e),
        };

        writeln!(self.output, "Result: {}", format_real(result))?;
        if let Err(e) = self.history.save(op.name(), x, Some(Number::Real(y)), result) {
            writeln!(self.output, "Error: {}", e)?;
        }
        Ok(())
    }

    fn view_history(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Calculation History:")?;
        match self.history.list() {
            Ok(HistoryView::Empty) => writeln!(self.output, "No history found."),
            Ok(HistoryView::Entries(history)) => writeln!(self.output, "{}", history),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    fn advanced_features(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "These are the advanced features (plugins) you can use:")?;

        let plugins: Vec<String> = self.registry.list_plugins().into_iter().collect();
        if plugins.is_empty() {
            return writeln!(self.output, "No advanced features available.");
        }
        for (i, name) in plugins.iter().enumerate() {
            writeln!(self.output, "{}. {} - {}", i + 1, name, self.registry.describe(name))?;
        }

        let Some(choice) =
            self.read_answer("Enter the number of the advanced feature you want to use: ")?
        else {
            return Ok(());
        };
        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| plugins.get(i));
        let Some(name) = selected else {
            return writeln!(self.output, "Invalid plugin choice.");
        };

        let mut ctx = PluginContext::new(&mut self.input, &mut self.output, &self.history);
        let outcome = self.registry.load_plugin(name, &mut ctx);
        debug!(plugin = %name, completed = outcome.is_completed(), "plugin finished");
        Ok(())
    }

    fn clear_history(&mut self) -> io::Result<()> {
        match self.history.clear() {
            Ok(()) => writeln!(self.output, "History cleared."),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    fn delete_history_prompt(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Select a delete option:")?;
        writeln!(self.output, "1. Delete all history")?;
        writeln!(self.output, "2. Delete history for a specific operation")?;

        let Some(choice) = self.read_answer("Choose an option (1-2): ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => match self.history.delete_all() {
                Ok(()) => writeln!(self.output, "History has been deleted."),
                Err(e) => writeln!(self.output, "Error: {}", e),
            },
            "2" => self.delete_specific_history_prompt(),
            _ => writeln!(self.output, "Invalid choice, going back to main menu."),
        }
    }

    fn delete_specific_history_prompt(&mut self) -> io::Result<()> {
        let Some(operation) =
            self.read_answer("Enter the operation to delete (e.g. add, factorial): ")?
        else {
            return Ok(());
        };

        match self.history.delete_by_operation(&operation) {
            Ok(DeleteOutcome::Removed(n)) => writeln!(
                self.output,
                "Deleted {} record(s) for operation: {}",
                n, operation
            ),
            Ok(DeleteOutcome::NoMatch) => {
                writeln!(self.output, "No records found for operation: {}", operation)
            }
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("subtract"), "Subtract");
        assert_eq!(capitalize(""), "");
    }
}
