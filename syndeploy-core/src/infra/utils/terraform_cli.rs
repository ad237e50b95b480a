use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{DeployError, ToolRunner};

/// Reads named outputs from a Terraform-managed deployment. Only used when
/// the local state file selects the Terraform branch of resolution - this
/// tool never mutates infrastructure.
pub struct TerraformCli {
    runner: Arc<dyn ToolRunner>,
    working_dir: PathBuf,
}

impl TerraformCli {
    pub fn new(runner: Arc<dyn ToolRunner>, working_dir: &Path) -> Self {
        Self {
            runner,
            working_dir: working_dir.to_owned(),
        }
    }

    pub fn output_raw(&self, name: &str) -> Result<String, DeployError> {
        let args: Vec<String> = vec![
            format!("-chdir={}", self.working_dir.display()),
            "output".to_owned(),
            "-raw".to_owned(),
            name.to_owned(),
        ];
        let output = self.runner.run("terraform", &args)?;
        if !output.success() {
            return Err(DeployError::command_failed("terraform", &args, &output));
        }
        // -raw prints the value without a trailing newline, but be tolerant
        Ok(output.stdout_trimmed().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeToolRunner;

    #[test]
    fn test_output_raw() {
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(
            &["output", "-raw", "synapse_workspace_name"],
            FakeToolRunner::ok("ws1"),
        );

        let tf = TerraformCli::new(fake, Path::new("/deploy"));
        assert_eq!(tf.output_raw("synapse_workspace_name").unwrap(), "ws1");
    }

    #[test]
    fn test_missing_output_fails() {
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(
            &["output"],
            FakeToolRunner::err(1, "Output \"nope\" not found"),
        );

        let tf = TerraformCli::new(fake, Path::new("/deploy"));
        assert!(tf.output_raw("nope").is_err());
    }
}
