//! date: print the wall-clock time.

use async_trait::async_trait;
use chrono::Local;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};

/// Prints the current local time in ISO-8601 form with a UTC offset,
/// e.g. `2024-05-01T09:30:00+02:00`.
pub struct Date;

#[async_trait]
impl Tool for Date {
    fn name(&self) -> &str {
        "date"
    }

    async fn execute(&self, _args: &[String], _ctx: &mut ExecContext) -> ExecResult {
        let now = Local::now().format("%Y-%m-%dT%H:%M:%S%:z");
        ExecResult::success(now.to_string())
    }
}
