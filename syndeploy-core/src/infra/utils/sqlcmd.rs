use std::path::Path;
use std::sync::Arc;

use crate::domain::{DeployError, ToolRunner};

///////////////////////////////////////////////////////////////////////////////
// SqlCmd
///////////////////////////////////////////////////////////////////////////////

/// A server/database/login triple to execute statements against
#[derive(Debug, Clone)]
pub struct SqlTarget {
    pub server: String,
    pub database: String,
    pub login: String,
    pub password: String,
}

/// Wraps the `sqlcmd` command runner. Invocations carry `-b` so SQL errors
/// surface as a non-zero exit status instead of vanishing into stdout.
pub struct SqlCmd {
    runner: Arc<dyn ToolRunner>,
}

impl SqlCmd {
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self { runner }
    }

    pub fn execute_query(&self, target: &SqlTarget, query: &str) -> Result<(), DeployError> {
        self.execute(target, "-Q", query)
    }

    pub fn execute_script(&self, target: &SqlTarget, script: &Path) -> Result<(), DeployError> {
        self.execute(target, "-i", &script.to_string_lossy())
    }

    fn execute(&self, target: &SqlTarget, input_flag: &str, input: &str) -> Result<(), DeployError> {
        let args: Vec<String> = vec![
            "-S".to_owned(),
            target.server.clone(),
            "-d".to_owned(),
            target.database.clone(),
            "-U".to_owned(),
            target.login.clone(),
            "-P".to_owned(),
            target.password.clone(),
            "-I".to_owned(),
            "-b".to_owned(),
            input_flag.to_owned(),
            input.to_owned(),
        ];
        let output = self.runner.run("sqlcmd", &args)?;
        if !output.success() {
            return Err(DeployError::command_failed("sqlcmd", &args, &output));
        }
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeToolRunner;

    fn target() -> SqlTarget {
        SqlTarget {
            server: "ws1.sql.azuresynapse.net".to_owned(),
            database: "master".to_owned(),
            login: "sqladmin".to_owned(),
            password: "secret".to_owned(),
        }
    }

    #[test]
    fn test_query_invocation_shape() {
        let fake = Arc::new(FakeToolRunner::new());
        let sql = SqlCmd::new(fake.clone());
        sql.execute_query(&target(), "SELECT 1").unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        let (program, args) = &calls[0];
        assert_eq!(program, "sqlcmd");
        assert!(args.contains(&"-b".to_owned()));
        assert!(args.ends_with(&["-Q".to_owned(), "SELECT 1".to_owned()]));
    }

    #[test]
    fn test_sql_error_propagates() {
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(&["-Q"], FakeToolRunner::err(1, "Incorrect syntax near 'FROM'"));

        let sql = SqlCmd::new(fake);
        let res = sql.execute_query(&target(), "SELECT FROM");
        assert!(matches!(res, Err(DeployError::CommandFailed { .. })));
    }
}
