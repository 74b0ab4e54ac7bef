//! Script replay: feed stored lines through a shell one at a time.
//!
//! The runner is caller-driven. Each [`ScriptRunner::step`] consumes
//! one runnable line, echoes it behind a prompt as if a person had
//! typed it, and reports the script's status. Replay is strict: the
//! first failed command stops the run.

use crate::result::ExecResult;
use crate::shell::Shell;

/// Where a replay currently stands. Terminal states are sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Lines remain.
    Running,
    /// Every line ran and none failed.
    Completed,
    /// A command failed on this 1-based line and the rest was skipped.
    Stopped { line: usize },
    /// A command asked the session to end (`exit`).
    Terminated,
}

/// Replays a script's lines against a [`Shell`].
pub struct ScriptRunner {
    lines: Vec<String>,
    next: usize,
    status: ScriptStatus,
}

impl ScriptRunner {
    pub fn new(source: &str) -> Self {
        Self {
            lines: source.lines().map(str::to_string).collect(),
            next: 0,
            status: ScriptStatus::Running,
        }
    }

    pub fn status(&self) -> ScriptStatus {
        self.status
    }

    /// Runs the next runnable line, sending display output to `out`.
    ///
    /// Blank lines and `#` comments are skipped without a trace. The
    /// echoed command carries the shell's prompt; command output and
    /// errors follow line by line. On `exit` the run ends quietly; on
    /// failure or completion a `[script]` summary line is emitted.
    pub async fn step(&mut self, shell: &mut Shell, out: &mut dyn FnMut(&str)) -> ScriptStatus {
        if self.status != ScriptStatus::Running {
            return self.status;
        }

        while let Some(line) = self.lines.get(self.next) {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.next += 1;
                continue;
            }
            break;
        }

        let Some(line) = self.lines.get(self.next).cloned() else {
            self.status = ScriptStatus::Completed;
            out("[script] completed without errors");
            return self.status;
        };
        let lineno = self.next + 1;
        self.next += 1;

        out(&format!("{}{}", shell.prompt(), line));
        let result = shell.execute(&line).await;
        emit(&result, out);

        if result.terminate {
            self.status = ScriptStatus::Terminated;
        } else if !result.ok() {
            self.status = ScriptStatus::Stopped { line: lineno };
            out(&format!("[script] stopped at line {lineno}"));
        }
        self.status
    }
}

fn emit(result: &ExecResult, out: &mut dyn FnMut(&str)) {
    for line in result.out.lines() {
        out(line);
    }
    for line in result.err.lines() {
        out(line);
    }
}
