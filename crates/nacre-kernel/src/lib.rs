//! Core engine for the nacre shell.
//!
//! nacre is a POSIX-like shell over an in-memory virtual filesystem. This
//! crate owns the whole command pipeline: the node tree and its CSV loader,
//! path resolution, the permission engine, shell-style tokenization, the
//! command dispatcher with its built-in tools, and scripted replay.
//!
//! The kernel performs no host I/O. Callers hand it byte buffers and command
//! lines and decide what to do with the resulting text; the interactive
//! front end lives in `nacre-repl`.

pub mod lexer;
pub mod mode;
pub mod result;
pub mod script;
pub mod shell;
pub mod tools;
pub mod vfs;

pub use result::ExecResult;
pub use script::{ScriptRunner, ScriptStatus};
pub use shell::{Shell, ShellConfig};
pub use tools::{ExecContext, Tool, ToolRegistry};
pub use vfs::{LoadError, Node, Vfs};
