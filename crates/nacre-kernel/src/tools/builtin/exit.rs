//! exit: end the session.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};

/// Says goodbye and asks the host loop to stop. The host decides what
/// stopping means: the repl leaves its read loop, a script run ends
/// the whole process.
pub struct Exit;

#[async_trait]
impl Tool for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    async fn execute(&self, _args: &[String], _ctx: &mut ExecContext) -> ExecResult {
        ExecResult::exit("bye")
    }
}
