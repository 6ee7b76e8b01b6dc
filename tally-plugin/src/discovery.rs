//! Plugin discovery
//!
//! A plugin is announced by a descriptor file `<name>.<extension>` in the
//! discovery directory. The manifest file shares the extension but is not
//! a plugin. If the first line of a descriptor is a `# ...` comment it is
//! used as the plugin's description.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_PLUGIN_DIR: &str = "plugins";
pub const DEFAULT_EXTENSION: &str = "plugin";
pub const DEFAULT_MANIFEST: &str = "manifest";

/// A plugin found in the discovery directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub path: PathBuf,
}

/// Where and how to look for plugins
#[derive(Debug, Clone)]
pub struct Discovery {
    pub dir: PathBuf,
    pub extension: String,
    pub manifest: String,
}

impl Discovery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            manifest: DEFAULT_MANIFEST.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Path the descriptor for `name` would have
    pub fn descriptor_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.extension))
    }

    /// List every plugin descriptor, sorted by name. A missing or
    /// unreadable directory yields nothing.
    pub fn scan(&self) -> Vec<PluginDescriptor> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "plugin directory not available, no plugins listed");
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |e| e != self.extension.as_str()) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if name == self.manifest || !is_valid_name(name) {
                continue;
            }

            found.push(PluginDescriptor {
                name: name.to_string(),
                description: extract_description(&path),
                path: path.clone(),
            });
        }

        found.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(dir = %self.dir.display(), count = found.len(), "plugins discovered");
        found
    }
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new(DEFAULT_PLUGIN_DIR)
    }
}

/// Plugin names are ASCII alphanumerics, `_` and `-`
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Extract description from a first line `# ...` comment
fn extract_description(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let first_line = content.lines().next()?.trim();
    let description = first_line.strip_prefix('#')?.trim();
    if description.is_empty() {
        None
    } else {
        Some(description.to_string())
    }
}
