//! tac: print a file's lines in reverse order.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};
use crate::vfs::Node;

pub struct Tac;

#[async_trait]
impl Tool for Tac {
    fn name(&self) -> &str {
        "tac"
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext) -> ExecResult {
        let [path] = args else {
            return ExecResult::failure(2, "tac: expected exactly one argument");
        };
        let (_, node) = ctx.vfs.resolve(&ctx.cwd, path);
        let content = match node {
            Some(Node::File { content, .. }) => content,
            Some(Node::Directory { .. }) => {
                return ExecResult::failure(1, format!("tac: {path}: Is a directory"));
            }
            None => {
                return ExecResult::failure(
                    1,
                    format!("tac: {path}: No such file or directory"),
                );
            }
        };
        let Ok(text) = std::str::from_utf8(content) else {
            return ExecResult::failure(1, format!("tac: {path}: invalid UTF-8"));
        };
        let reversed: Vec<&str> = text.lines().rev().collect();
        ExecResult::success(reversed.join("\n"))
    }
}
