//! Plugin Registry
//!
//! Plugins are compiled in and registered by name. Which ones are offered
//! is decided by the discovery directory: a plugin is loadable only when
//! its descriptor file is present and an implementation is registered.

use crate::discovery::{is_valid_name, Discovery, PluginDescriptor};
use crate::{CommandPlugin, PluginContext, PluginError};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};
use std::thread;
use tracing::{debug, info, warn};

pub const NO_DESCRIPTION: &str = "No description available.";

/// What happened when a plugin was requested
#[derive(Debug)]
pub enum PluginOutcome {
    Completed,
    LoadFailed(PluginError),
    ExecutionFailed(PluginError),
}

impl PluginOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PluginOutcome::Completed)
    }

    pub fn error(&self) -> Option<&PluginError> {
        match self {
            PluginOutcome::Completed => None,
            PluginOutcome::LoadFailed(e) | PluginOutcome::ExecutionFailed(e) => Some(e),
        }
    }
}

/// Central plugin registry
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn CommandPlugin>>,
    discovery: Discovery,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
            discovery: Discovery::default(),
        }
    }

    pub fn with_plugin<P: CommandPlugin + 'static>(mut self, plugin: P) -> Self {
        let name = plugin.meta().name.to_string();
        self.plugins.insert(name, Arc::new(plugin));
        self
    }

    pub fn with_discovery(mut self, discovery: Discovery) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    pub fn get_plugin(&self, name: &str) -> Option<&dyn CommandPlugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    /// Names of the compiled-in plugins, discovered or not
    pub fn registered(&self) -> BTreeSet<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    pub fn discover(&self) -> Vec<PluginDescriptor> {
        self.discovery.scan()
    }

    /// Names of the plugins announced in the discovery directory
    pub fn list_plugins(&self) -> BTreeSet<String> {
        self.discover().into_iter().map(|d| d.name).collect()
    }

    /// Human-readable description: descriptor comment first, then the
    /// plugin's own metadata.
    pub fn describe(&self, name: &str) -> String {
        let from_descriptor = self
            .discover()
            .into_iter()
            .find(|d| d.name == name)
            .and_then(|d| d.description);

        from_descriptor
            .or_else(|| self.get_plugin(name).map(|p| p.meta().description.to_string()))
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }

    /// Map a name to a runnable plugin
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn CommandPlugin>, PluginError> {
        if !is_valid_name(name) {
            return Err(PluginError::InvalidName(name.to_string()));
        }

        if !self.discovery.descriptor_path(name).is_file() {
            let available = self.list_plugins();
            return Err(PluginError::NotFound {
                name: name.to_string(),
                dir: self.discovery.dir.clone(),
                suggestions: find_similar(name, available.iter().map(String::as_str))
                    .into_iter()
                    .take(3)
                    .collect(),
            });
        }

        self.plugins
            .get(name)
            .cloned()
            .ok_or_else(|| PluginError::Unregistered(name.to_string()))
    }

    /// Resolve `name` and run it. Resolution failures, errors returned by
    /// the plugin and panics inside it are all reported on the session
    /// output and returned as an outcome; none of them propagate.
    pub fn load_plugin(&self, name: &str, ctx: &mut PluginContext<'_>) -> PluginOutcome {
        let plugin = match self.resolve(name) {
            Ok(p) => p,
            Err(e) => {
                warn!(plugin = name, error = %e, "plugin could not be loaded");
                report(ctx, format!("Error loading plugin {}: {}", name, e));
                return PluginOutcome::LoadFailed(e);
            }
        };

        info!(plugin = name, "running plugin");
        let run = contain_panic(|| plugin.execute(ctx));

        let error = match run {
            Ok(Ok(())) => {
                debug!(plugin = name, "plugin completed");
                return PluginOutcome::Completed;
            }
            Ok(Err(e)) => PluginError::Execution {
                name: name.to_string(),
                reason: e.to_string(),
            },
            Err(payload) => PluginError::Panicked {
                name: name.to_string(),
                reason: panic_message(payload.as_ref()),
            },
        };

        warn!(plugin = name, error = %error, "plugin failed");
        report(ctx, format!("Error running plugin {}: {}", name, error));
        PluginOutcome::ExecutionFailed(error)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn report(ctx: &mut PluginContext<'_>, message: String) {
    if let Err(e) = ctx.say(&message) {
        warn!(error = %e, report = %message, "could not write plugin report");
    }
}

thread_local! {
    static CONTAINING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Run `f`, turning a panic into an `Err`. The process-wide panic hook is
/// wrapped once so that panics caught here are not printed over the
/// session; panics on other threads, or outside `f`, still reach the
/// previous hook.
fn contain_panic<T>(f: impl FnOnce() -> T) -> thread::Result<T> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CONTAINING.with(Cell::get) {
                previous(info);
            }
        }));
    });

    CONTAINING.with(|c| c.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CONTAINING.with(|c| c.set(false));
    result
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Candidate names ordered by similarity to `name` (for error suggestions)
fn find_similar<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let name_lower = name.to_lowercase();
    let mut matches: Vec<(String, usize)> = candidates
        .filter_map(|candidate| {
            let score = similarity_score(&name_lower, &candidate.to_lowercase());
            if score > 0 {
                Some((candidate.to_string(), score))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    matches.into_iter().map(|(name, _)| name).collect()
}

/// Similarity between a query and a candidate name; zero means unrelated
fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    if candidate.starts_with(query) {
        score += 100;
    } else if candidate.contains(query) {
        score += 50;
    } else if query.contains(candidate) {
        score += 30;
    }

    let query_chars: HashSet<char> = query.chars().collect();
    let candidate_chars: HashSet<char> = candidate.chars().collect();
    let common = query_chars.intersection(&candidate_chars).count();
    // A couple of shared letters is noise
    if common >= 3 {
        score += common * 2;
    }

    let len_diff = query.len().abs_diff(candidate.len());
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}
