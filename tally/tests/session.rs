//! End-to-end calculator sessions driven from scripted input

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tally::{Calculator, Config, Flow};
use tally_history::HistoryStore;
use tempfile::TempDir;

struct Session {
    dir: TempDir,
}

impl Session {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("plugins")).unwrap();
        Self { dir }
    }

    fn with_descriptor(self, name: &str, contents: &str) -> Self {
        fs::write(self.plugin_dir().join(format!("{}.plugin", name)), contents).unwrap();
        self
    }

    fn with_standard_descriptors(self) -> Self {
        self.with_descriptor("factorial", "# Calculates the factorial of a given number.\n")
            .with_descriptor("square_root", "# Calculates the square root of a given number.\n")
            .with_descriptor("manifest", "# plugin manifest\n")
    }

    fn plugin_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("plugins")
    }

    fn history_file(&self) -> std::path::PathBuf {
        self.dir.path().join("data").join("history.csv")
    }

    fn config(&self) -> Config {
        Config {
            history_file: self.history_file(),
            plugin_dir: self.plugin_dir(),
        }
    }

    /// Run a whole session over `script` and return everything printed
    fn run(&self, script: &str) -> String {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut calculator = Calculator::new(&self.config(), input, Vec::new());
        calculator.run().unwrap();
        String::from_utf8(calculator.into_output()).unwrap()
    }

    fn history_csv(&self) -> String {
        fs::read_to_string(self.history_file()).unwrap()
    }

    fn store(&self) -> HistoryStore {
        HistoryStore::new(self.history_file())
    }
}

fn seed(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn menu_is_shown_and_exit_says_goodbye() {
    let session = Session::new();
    let output = session.run("6\n");

    assert!(output.contains("Welcome to the Tally Calculator!"));
    for option in [
        "1. Basic Arithmetic Operations",
        "2. View History",
        "3. Advanced Features",
        "4. Clear History",
        "5. Delete History",
        "6. Exit",
    ] {
        assert!(output.contains(option), "missing {:?}", option);
    }
    assert!(output.ends_with("Exiting calculator... Thank you!\n"));
    assert!(!session.history_file().exists());
}

#[test]
fn end_of_input_ends_the_session() {
    let session = Session::new();
    let output = session.run("");
    assert!(output.contains("calc> "));
    assert!(!output.contains("Thank you"));
}

#[test]
fn arithmetic_menu_computes_and_records() {
    let session = Session::new();
    let output = session.run("1\n1\n5 3\n1\n4\n7 2\n6\n");

    assert!(output.contains("Result: 8.0"));
    assert!(output.contains("Result: 3.5"));
    assert_eq!(
        session.history_csv(),
        "operation,x,y,result\nadd,5.0,3.0,8.0\ndivide,7.0,2.0,3.5\n"
    );
}

#[test]
fn typed_commands_reach_the_same_operations() {
    let session = Session::new();
    let output = session.run("multiply 4 2.5\nsubtract 1 3\nexit\n");

    assert!(output.contains("Result: 10.0"));
    assert!(output.contains("Result: -2.0"));
    let history = session.store().load().unwrap();
    let operations: Vec<&str> = history.iter().map(|r| r.operation.as_str()).collect();
    assert_eq!(operations, ["multiply", "subtract"]);
}

#[test]
fn division_by_zero_is_reported_and_not_recorded() {
    let session = Session::new();
    let output = session.run("divide 5 0\n6\n");

    assert!(output.contains("Error: Cannot divide by zero"));
    assert!(!session.history_file().exists());
}

#[test]
fn bad_operands_are_reported() {
    let session = Session::new();
    let output = session.run("1\n2\nten 4\nadd 1\n6\n");

    assert_eq!(output.matches("Error: Invalid input:").count(), 2, "{}", output);
    assert!(!session.history_file().exists());
}

#[test]
fn unknown_choices_keep_the_session_alive() {
    let session = Session::new();
    let output = session.run("9\nhello\n\n1\n7\n6\n");

    assert_eq!(output.matches("Invalid choice, please select a valid option.").count(), 2);
    assert!(output.contains("Invalid choice, going back to main menu."));
    assert!(output.contains("Exiting calculator... Thank you!"));
}

#[test]
fn view_history_empty_and_populated() {
    let session = Session::new();
    let output = session.run("2\nadd 2 2\n2\n6\n");

    assert!(output.contains("Calculation History:\nNo history found."));
    assert!(output.contains("operation"));
    assert!(output.contains("add"));
    assert!(output.contains("4.0"));
}

#[test]
fn clear_history_keeps_the_header() {
    let session = Session::new();
    session.run("add 1 1\n4\n6\n");
    assert_eq!(session.history_csv(), "operation,x,y,result\n");
}

#[test]
fn delete_history_options() {
    let session = Session::new();
    let output = session.run("add 1 1\nadd 2 2\nmultiply 3 3\n5\n2\nadd\n5\n2\nadd\n6\n");

    assert!(output.contains("Deleted 2 record(s) for operation: add"));
    assert!(output.contains("No records found for operation: add"));
    assert_eq!(
        session.history_csv(),
        "operation,x,y,result\nmultiply,3.0,3.0,9.0\n"
    );

    let output = session.run("5\n1\n6\n");
    assert!(output.contains("History has been deleted."));
    assert_eq!(session.history_csv(), "operation,x,y,result\n");

    let output = session.run("5\n3\n6\n");
    assert!(output.contains("Invalid choice, going back to main menu."));
}

#[test]
fn advanced_features_list_and_run_plugins() {
    let session = Session::new().with_standard_descriptors();
    let output = session.run("3\n1\n5\n3\n2\n-4\n6\n");

    assert!(output.contains("1. factorial - Calculates the factorial of a given number."));
    assert!(output.contains("2. square_root - Calculates the square root of a given number."));
    assert!(!output.contains("manifest"));
    assert!(output.contains("The factorial of 5 is 120"));
    assert!(output.contains("The square root of -4.0 is 2j"));
    assert_eq!(
        session.history_csv(),
        "operation,x,y,result\nfactorial,5,,120\nsquare_root,-4.0,,2j\n"
    );
}

#[test]
fn advanced_features_reject_bad_choices() {
    let session = Session::new().with_standard_descriptors();
    let output = session.run("3\n0\n3\nfactorial\n3\n9\n6\n");
    assert_eq!(output.matches("Invalid plugin choice.").count(), 3);
}

#[test]
fn advanced_features_with_no_descriptors() {
    let session = Session::new();
    fs::remove_dir(session.plugin_dir()).unwrap();
    let output = session.run("3\n6\n");
    assert!(output.contains("No advanced features available."));
}

#[test]
fn plugin_errors_are_contained() {
    let session = Session::new()
        .with_standard_descriptors()
        .with_descriptor("ghost", "# Not implemented anywhere\n");

    // ghost is listed between factorial and square_root
    let output = session.run("3\n2\n3\n1\n-3\n3\n1\nabc\n6\n");

    assert!(output.contains("2. ghost - Not implemented anywhere"));
    assert!(output.contains("Error loading plugin ghost:"), "{}", output);
    assert!(output.contains("Factorial is not defined for negative numbers."));
    assert!(output.contains("Error: Invalid input for factorial. Please enter a valid number."));
    assert!(output.contains("Exiting calculator... Thank you!"));
    assert!(!session.history_file().exists());
}

#[test]
fn corrupt_history_is_reported_not_fatal() {
    let session = Session::new();
    seed(&session.history_file(), "operation,x,y,result\nadd,1.0\n");

    let output = session.run("2\nadd 1 2\n6\n");

    assert!(output.contains("Result: 3.0"));
    assert_eq!(output.matches("Error: Corrupt history file").count(), 2, "{}", output);
    assert_eq!(session.history_csv(), "operation,x,y,result\nadd,1.0\n");
}

#[test]
fn existing_history_is_extended() {
    let session = Session::new();
    seed(
        &session.history_file(),
        "operation,x,y,result\nfactorial,3,,6\n",
    );

    session.run("add 0.5 0.25\n6\n");

    assert_eq!(
        session.history_csv(),
        "operation,x,y,result\nfactorial,3,,6\nadd,0.5,0.25,0.75\n"
    );
}

#[test]
fn handle_choice_reports_exit() {
    let session = Session::new();
    let mut calculator = Calculator::new(&session.config(), Cursor::new(Vec::new()), Vec::new());

    assert_eq!(calculator.handle_choice("4").unwrap(), Flow::Continue);
    assert_eq!(calculator.handle_choice("quit").unwrap(), Flow::Exit);
    assert_eq!(calculator.history().path(), session.history_file().as_path());
}
