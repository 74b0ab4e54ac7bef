//! ls: list a directory, or a file as a single entry.

use async_trait::async_trait;

use crate::mode::format_octal;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};
use crate::vfs::Node;

/// Directory listing with `-l` (long format) and `-a` (dotfiles plus
/// the `.` and `..` entries).
pub struct Ls;

#[derive(Default)]
struct Flags {
    long: bool,
    all: bool,
}

fn parse_args(args: &[String]) -> Result<(Flags, String), String> {
    let mut flags = Flags::default();
    let mut target: Option<&str> = None;
    for arg in args {
        if arg.len() > 1 && arg.starts_with('-') {
            for option in arg.chars().skip(1) {
                match option {
                    'l' => flags.long = true,
                    'a' => flags.all = true,
                    other => return Err(format!("ls: invalid option -- '{other}'")),
                }
            }
        } else if target.is_none() {
            target = Some(arg);
        } else {
            return Err("ls: too many arguments".to_string());
        }
    }
    Ok((flags, target.unwrap_or(".").to_string()))
}

fn render(entries: &[(&str, &Node)], long: bool) -> String {
    if long {
        entries
            .iter()
            .map(|(name, node)| {
                format!("{}{} {}", node.kind_char(), format_octal(node.mode()), name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        entries
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[async_trait]
impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext) -> ExecResult {
        let (flags, path) = match parse_args(args) {
            Ok(parsed) => parsed,
            Err(err) => return ExecResult::failure(2, err),
        };

        let (segments, node) = ctx.vfs.resolve(&ctx.cwd, &path);
        let Some(node) = node else {
            return ExecResult::failure(
                1,
                format!("ls: cannot access '{path}': No such file or directory"),
            );
        };

        let Node::Directory { children, .. } = node else {
            // A file target lists as a single entry under its basename.
            let basename = segments.last().map(String::as_str).unwrap_or(path.as_str());
            return ExecResult::success(render(&[(basename, node)], flags.long));
        };

        let mut entries: Vec<(&str, &Node)> = Vec::new();
        if flags.all {
            let parent = if segments.is_empty() {
                node
            } else {
                ctx.vfs.node(&segments[..segments.len() - 1]).unwrap_or(node)
            };
            entries.push((".", node));
            entries.push(("..", parent));
        }
        for (name, child) in children {
            if flags.all || !name.starts_with('.') {
                entries.push((name, child));
            }
        }
        ExecResult::success(render(&entries, flags.long))
    }
}
