//! touch: create an empty file or refresh an mtime.

use async_trait::async_trait;
use chrono::Local;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};
use crate::vfs::{Node, Vfs};

/// Creates the named file empty if it is missing, otherwise bumps its
/// modification time. Works on directories too in the existing case,
/// so `touch ..` refreshes the parent. The containing directory must
/// already exist.
pub struct Touch;

#[async_trait]
impl Tool for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext) -> ExecResult {
        let [path] = args else {
            return ExecResult::failure(2, "touch: expected exactly one argument");
        };
        let missing = || {
            ExecResult::failure(1, format!("touch: {path}: No such file or directory"))
        };

        let (parent_segments, parent, basename) = ctx.vfs.resolve_parent(&ctx.cwd, path);
        let (Some(name), Some(Node::Directory { .. })) = (basename, parent) else {
            return missing();
        };

        // A `..` or `.` basename can name an existing node the parent's
        // child map would miss; resolve the full path before deciding
        // to create anything.
        let target = Vfs::canonicalize(&ctx.cwd, path);
        match ctx.vfs.node_mut(&target) {
            Some(node) => node.set_mtime(Local::now()),
            None => {
                let Some(children) = ctx.vfs.dir_children_mut(&parent_segments) else {
                    return missing();
                };
                children.insert(name, Node::file(Vec::new()));
            }
        }
        ExecResult::success("")
    }
}
