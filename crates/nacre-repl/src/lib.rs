//! The interactive front end: banner, line editing, script replay.
//!
//! Everything stateful lives in the kernel's [`Shell`]; this crate
//! only moves lines and bytes between the terminal, the filesystem on
//! disk, and that shell.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::runtime::Runtime;

use nacre_kernel::{ScriptRunner, ScriptStatus, Shell, ShellConfig};

/// A terminal session wrapping one [`Shell`].
pub struct Repl {
    shell: Shell,
    runtime: Runtime,
}

impl Repl {
    pub fn new(config: ShellConfig) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            shell: Shell::new(config),
            runtime,
        })
    }

    pub fn banner(&self) {
        println!("nacre v{}", env!("CARGO_PKG_VERSION"));
        println!("commands: {}", self.shell.tool_names().join(", "));
        println!("type 'exit' to quit");
    }

    /// Reads a CSV tree description and installs it in the shell.
    ///
    /// Failures are reported and the session keeps going with whatever
    /// tree it already had.
    pub fn load_vfs(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match self.try_load_vfs(path, &name) {
            Ok(()) => println!("[vfs] loaded {name}"),
            Err(err) => println!("[vfs] load failed: {err}"),
        }
    }

    fn try_load_vfs(&mut self, path: &Path, name: &str) -> Result<()> {
        let bytes = fs::read(path)?;
        self.shell.load_vfs(bytes, name)?;
        Ok(())
    }

    /// Replays a script file against the shell, echoing each command.
    ///
    /// Returns `false` when the script ran `exit`, meaning the whole
    /// session should end rather than continue into interactive mode.
    pub fn run_script(&mut self, path: &Path) -> bool {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("[script] cannot read {}: {err}", path.display());
                return true;
            }
        };
        println!("[script] running {}", path.display());
        let mut runner = ScriptRunner::new(&source);
        loop {
            let status = self
                .runtime
                .block_on(runner.step(&mut self.shell, &mut |line: &str| println!("{line}")));
            match status {
                ScriptStatus::Running => {}
                ScriptStatus::Terminated => return false,
                ScriptStatus::Completed | ScriptStatus::Stopped { .. } => return true,
            }
        }
    }

    /// The read-eval-print loop proper. Returns when the user exits.
    pub fn run_interactive(&mut self) -> Result<()> {
        let mut rl: Editor<(), DefaultHistory> =
            Editor::new().context("Failed to create editor")?;

        let history_path = directories::BaseDirs::new()
            .map(|b| b.data_dir().join("nacre").join("history.txt"));
        if let Some(ref path) = history_path {
            // Missing history just means a first run.
            let _ = rl.load_history(path);
        }

        loop {
            match rl.readline(&self.shell.prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    let result = self.runtime.block_on(self.shell.execute(line));
                    if !result.out.is_empty() {
                        println!("{}", result.out);
                    }
                    if !result.err.is_empty() {
                        eprintln!("{}", result.err);
                    }
                    if result.terminate {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        save_history(&mut rl, &history_path);
        Ok(())
    }
}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", err);
            }
        }
        if let Err(err) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", err);
        }
    }
}
