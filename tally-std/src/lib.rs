//! Tally Standard Plugins

pub mod plugins;

pub use plugins::{factorial, square_root, Factorial, SquareRoot};

use tally_plugin::PluginRegistry;

/// Register the standard plugins
pub fn load_standard_plugins(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_plugin(plugins::Factorial)
        .with_plugin(plugins::SquareRoot)
}

/// Create registry with the standard plugins
pub fn standard_registry() -> PluginRegistry {
    load_standard_plugins(PluginRegistry::new())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tally_history::HistoryStore;
    use tally_plugin::{CommandPlugin, Discovery, PluginContext, PluginOutcome};

    #[test]
    fn test_load_standard_plugins() {
        let registry = standard_registry();
        assert!(registry.get_plugin("factorial").is_some());
        assert!(registry.get_plugin("square_root").is_some());
        assert_eq!(registry.registered().len(), 2);
    }

    #[test]
    fn test_plugin_meta_matches_registration() {
        let registry = standard_registry();
        for name in ["factorial", "square_root"] {
            assert_eq!(registry.get_plugin(name).unwrap().meta().name, name);
        }
        assert_eq!(Factorial.meta().description, "Calculates the factorial of a given number.");
        assert_eq!(SquareRoot.meta().description, "Calculates the square root of a given number.");
    }

    #[test]
    fn test_shipped_descriptors_match_registered_plugins() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../plugins");
        let registry = standard_registry().with_discovery(Discovery::new(dir));
        let listed: Vec<String> = registry.list_plugins().into_iter().collect();
        assert_eq!(listed, ["factorial", "square_root"]);
        assert_eq!(registry.describe("factorial"), "Calculates the factorial of a given number.");
    }

    #[test]
    fn test_registry_runs_factorial_end_to_end() {
        let plugin_dir = tempfile::tempdir().unwrap();
        fs::write(plugin_dir.path().join("factorial.plugin"), "").unwrap();
        let history_dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(history_dir.path().join("history.csv"));
        let registry = standard_registry().with_discovery(Discovery::new(plugin_dir.path()));

        let mut input = Cursor::new(b"6\n".to_vec());
        let mut output = Vec::new();
        let outcome = {
            let mut ctx = PluginContext::new(&mut input, &mut output, &store);
            registry.load_plugin("factorial", &mut ctx)
        };

        assert!(matches!(outcome, PluginOutcome::Completed));
        assert!(String::from_utf8(output).unwrap().contains("The factorial of 6 is 720"));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_registry_contains_history_failure() {
        let plugin_dir = tempfile::tempdir().unwrap();
        fs::write(plugin_dir.path().join("square_root.plugin"), "").unwrap();
        let history_dir = tempfile::tempdir().unwrap();
        let history_file = history_dir.path().join("history.csv");
        fs::write(&history_file, "garbage\n").unwrap();
        let store = HistoryStore::new(&history_file);
        let registry = standard_registry().with_discovery(Discovery::new(plugin_dir.path()));

        let mut input = Cursor::new(b"9\n".to_vec());
        let mut output = Vec::new();
        let outcome = {
            let mut ctx = PluginContext::new(&mut input, &mut output, &store);
            registry.load_plugin("square_root", &mut ctx)
        };

        assert!(matches!(outcome, PluginOutcome::ExecutionFailed(_)));
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Error running plugin square_root:"), "{}", output);
    }
}
