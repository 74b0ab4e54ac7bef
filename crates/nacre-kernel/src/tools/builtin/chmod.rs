//! chmod: change permission bits, optionally through a subtree.

use async_trait::async_trait;

use crate::mode;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};
use crate::vfs::Vfs;

/// `chmod [-R] MODE PATH` with numeric and symbolic modes. With `-R`
/// a bad mode is rejected before anything is altered, so a subtree is
/// never left half-changed.
pub struct Chmod;

#[async_trait]
impl Tool for Chmod {
    fn name(&self) -> &str {
        "chmod"
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext) -> ExecResult {
        let recursive = args.first().map(String::as_str) == Some("-R");
        let rest = if recursive { &args[1..] } else { args };
        let [spec, path] = rest else {
            return ExecResult::failure(2, "chmod: expected a mode and a path");
        };

        let segments = Vfs::canonicalize(&ctx.cwd, path);
        let Some(node) = ctx.vfs.node_mut(&segments) else {
            return ExecResult::failure(
                1,
                format!("chmod: cannot access '{path}': No such file or directory"),
            );
        };

        let outcome = if recursive {
            mode::apply_tree(node, spec)
        } else {
            mode::apply(node.mode(), spec, node.is_dir()).map(|m| node.set_mode(m))
        };
        match outcome {
            Ok(()) => ExecResult::success(""),
            Err(err) => ExecResult::failure(1, format!("chmod: {err}")),
        }
    }
}
