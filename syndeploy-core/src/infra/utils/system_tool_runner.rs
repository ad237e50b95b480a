use std::io;
use std::process::Command;

use crate::domain::{ToolOutput, ToolRunner};

/// Spawns real processes. Every invocation is synchronous and blocking -
/// the procedure waits for each tool to return before proceeding.
pub struct SystemToolRunner;

impl SystemToolRunner {
    pub fn new() -> Self {
        Self {}
    }
}

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, io::Error> {
        let output = Command::new(program).args(args).output()?;
        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
