//! pwd: print the working directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool};

pub struct Pwd;

#[async_trait]
impl Tool for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    async fn execute(&self, _args: &[String], ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(ctx.cwd_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pwd_prints_root() {
        let mut ctx = ExecContext::new();
        let result = Pwd.execute(&[], &mut ctx).await;
        assert!(result.ok());
        assert_eq!(result.out, "/");
    }

    #[tokio::test]
    async fn test_pwd_prints_nested_path() {
        let mut ctx = ExecContext::new();
        ctx.cwd = vec!["var".to_string(), "log".to_string()];
        let result = Pwd.execute(&[], &mut ctx).await;
        assert_eq!(result.out, "/var/log");
    }
}
