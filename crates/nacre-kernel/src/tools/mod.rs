//! Tools: the commands the shell can run, and the registry that routes
//! to them by name.

pub mod builtin;
mod context;
mod traits;

use std::collections::HashMap;
use std::sync::Arc;

pub use context::ExecContext;
pub use traits::Tool;

/// Name-to-tool routing table.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name, replacing any previous
    /// tool with that name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered names, sorted for stable display.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}
