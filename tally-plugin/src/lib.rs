//! Tally Plugin System
//!
//! Extension commands are compiled in and registered by name. A plugin
//! directory announces which of them are available: each `<name>.plugin`
//! file makes the plugin of that name listable and loadable.
//!
//! Loading never fails past the registry: a missing plugin, an error
//! returned by a plugin, or a panic inside one is written to the session
//! output and returned as a `PluginOutcome`.

mod context;
mod discovery;
mod error;
mod registry;
mod traits;

pub use context::PluginContext;
pub use discovery::{
    is_valid_name, Discovery, PluginDescriptor, DEFAULT_EXTENSION, DEFAULT_MANIFEST,
    DEFAULT_PLUGIN_DIR,
};
pub use error::{ExecuteError, PluginError};
pub use registry::{PluginOutcome, PluginRegistry, NO_DESCRIPTION};
pub use traits::{CommandPlugin, PluginMeta};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{CommandPlugin, ExecuteError, PluginContext, PluginMeta, PluginRegistry};
    pub use tally_core::prelude::*;
    pub use tally_history::HistoryStore;
}
