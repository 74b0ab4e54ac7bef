//! Built-in commands.

mod cd;
mod chmod;
mod date;
mod exit;
mod ls;
mod pwd;
mod tac;
mod touch;
mod vfs_info;

use std::sync::Arc;

use crate::tools::ToolRegistry;

/// Registers every built-in on `registry`.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(cd::Cd));
    registry.register(Arc::new(chmod::Chmod));
    registry.register(Arc::new(date::Date));
    registry.register(Arc::new(exit::Exit));
    registry.register(Arc::new(ls::Ls));
    registry.register(Arc::new(pwd::Pwd));
    registry.register(Arc::new(tac::Tac));
    registry.register(Arc::new(touch::Touch));
    registry.register(Arc::new(vfs_info::VfsInfo));
}
