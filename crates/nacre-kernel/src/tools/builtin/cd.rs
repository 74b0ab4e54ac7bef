//! cd: change the working directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};
use crate::vfs::Node;

/// Moves the session to another directory. The working directory only
/// changes when the target resolves to one.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext) -> ExecResult {
        let [path] = args else {
            return ExecResult::failure(2, "cd: expected exactly one argument");
        };
        let (segments, node) = ctx.vfs.resolve(&ctx.cwd, path);
        match node {
            Some(Node::Directory { .. }) => {
                ctx.cwd = segments;
                ExecResult::success("")
            }
            Some(Node::File { .. }) => {
                ExecResult::failure(1, format!("cd: {path}: Not a directory"))
            }
            None => ExecResult::failure(1, format!("cd: {path}: No such file or directory")),
        }
    }
}
