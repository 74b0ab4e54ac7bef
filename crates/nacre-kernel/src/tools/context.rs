//! Mutable session state handed to every tool.

use crate::vfs::Vfs;

/// What a command sees and may change: the filesystem and the working
/// directory, held as a segment sequence (empty means the root).
#[derive(Debug)]
pub struct ExecContext {
    pub vfs: Vfs,
    pub cwd: Vec<String>,
}

impl ExecContext {
    pub fn new() -> Self {
        Self {
            vfs: Vfs::new(),
            cwd: Vec::new(),
        }
    }

    /// The working directory as an absolute path, `/` for the root.
    pub fn cwd_display(&self) -> String {
        format!("/{}", self.cwd.join("/"))
    }
}

impl Default for ExecContext {
    fn default() -> Self {
        Self::new()
    }
}
