//! ExecResult: the structured outcome of every command execution.

/// The result of executing one command line.
///
/// Commands communicate exclusively through this type: output text, an
/// exit code, and whether the session should end. Handlers never return
/// errors to the dispatcher; anything that goes wrong becomes a failed
/// result with a message in `err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    /// Standard output as a string, without a trailing newline.
    pub out: String,
    /// Standard error as a string.
    pub err: String,
    /// True when the command asks the session to end (`exit`).
    pub terminate: bool,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
            terminate: false,
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
            terminate: false,
        }
    }

    /// Create a successful result that also ends the session.
    pub fn exit(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
            terminate: true,
        }
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }
}

impl Default for ExecResult {
    fn default() -> Self {
        Self::success("")
    }
}
