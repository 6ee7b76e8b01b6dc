//! Plugin traits

use crate::{ExecuteError, PluginContext};

/// Metadata for a command plugin
#[derive(Debug, Clone)]
pub struct PluginMeta {
    pub name: &'static str,
    pub description: &'static str,
}

/// Command plugin: one entry point, no arguments from the caller.
/// Anything the plugin needs it asks for through the context.
pub trait CommandPlugin: Send + Sync {
    fn meta(&self) -> PluginMeta;
    fn execute(&self, ctx: &mut PluginContext<'_>) -> Result<(), ExecuteError>;
}
