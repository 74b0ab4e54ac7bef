//! The trait every command implements.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::ExecContext;

/// A named command the shell can dispatch to.
///
/// `execute` never fails at the type level: anything that goes wrong is
/// reported through the returned [`ExecResult`], so one bad command can
/// never take the session down with it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name the dispatcher routes on.
    fn name(&self) -> &str;

    /// Runs the command against the session state.
    async fn execute(&self, args: &[String], ctx: &mut ExecContext) -> ExecResult;
}
