//! The shell: session state plus the dispatch loop's inner step.
//!
//! A [`Shell`] owns the tool registry and the execution context and
//! turns one line of input into one [`ExecResult`]. It has no opinion
//! about where lines come from; the repl and the script runner both
//! drive it.

use std::sync::Arc;

use crate::lexer;
use crate::result::ExecResult;
use crate::tools::{builtin, ExecContext, ToolRegistry};
use crate::vfs::{LoadError, Vfs};

/// Identity shown in the prompt.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub user: String,
    pub host: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            host: "host".to_string(),
        }
    }
}

/// One interactive session: filesystem, working directory, and the
/// commands that operate on them.
pub struct Shell {
    config: ShellConfig,
    tools: Arc<ToolRegistry>,
    ctx: ExecContext,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        let mut registry = ToolRegistry::new();
        builtin::register_builtins(&mut registry);
        Self {
            config,
            tools: Arc::new(registry),
            ctx: ExecContext::new(),
        }
    }

    /// The prompt the repl and the script echo both print.
    pub fn prompt(&self) -> String {
        format!("[{}@{}]$ ", self.config.user, self.config.host)
    }

    /// Registered command names, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.names()
    }

    pub fn context(&self) -> &ExecContext {
        &self.ctx
    }

    /// Replaces the filesystem with one built from a CSV description
    /// and moves the session back to the root.
    ///
    /// On failure the current tree and working directory stay exactly
    /// as they were.
    pub fn load_vfs(&mut self, bytes: Vec<u8>, name: &str) -> Result<(), LoadError> {
        self.ctx.vfs = Vfs::from_csv(bytes, name)?;
        self.ctx.cwd.clear();
        tracing::debug!(name, "vfs loaded");
        Ok(())
    }

    /// Runs one line: tokenize, route on the first word, execute.
    ///
    /// Lexing problems and unknown names come back as failed results
    /// rather than errors; a blank line succeeds with no output.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn execute(&mut self, line: &str) -> ExecResult {
        let words = match lexer::split(line) {
            Ok(words) => words,
            Err(err) => return ExecResult::failure(2, format!("parse error: {err}")),
        };
        let Some((name, args)) = words.split_first() else {
            return ExecResult::success("");
        };
        let Some(tool) = self.tools.get(name) else {
            return ExecResult::failure(127, format!("command not found: {name}"));
        };
        tool.execute(args, &mut self.ctx).await
    }
}
