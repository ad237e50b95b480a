use std::io;

///////////////////////////////////////////////////////////////////////////////
// ToolRunner
///////////////////////////////////////////////////////////////////////////////

/// Captured result of a single external tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, or `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Trimmed stdout, the way `--output tsv` style queries are consumed
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// The single seam through which every external tool (cloud CLI, SQL command
/// runner, infrastructure tooling) is invoked. All side effects on the cloud
/// control plane go through an implementation of this trait.
pub trait ToolRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, io::Error>;
}
