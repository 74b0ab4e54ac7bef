//! vfs-info: report where the filesystem came from.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};

/// Prints the loaded description's name and content digest, so a
/// session can confirm it is looking at the tree it thinks it is.
pub struct VfsInfo;

#[async_trait]
impl Tool for VfsInfo {
    fn name(&self) -> &str {
        "vfs-info"
    }

    async fn execute(&self, _args: &[String], ctx: &mut ExecContext) -> ExecResult {
        match (ctx.vfs.source_name(), ctx.vfs.source_digest()) {
            (Some(name), Some(digest)) => {
                ExecResult::success(format!("VFS: name={name}, sha256={digest}"))
            }
            _ => ExecResult::success("VFS not loaded."),
        }
    }
}
