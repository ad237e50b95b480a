use std::path::PathBuf;

use thiserror::Error;

use super::ToolOutput;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Setup has already completed - remove {path} to force a re-run")]
    AlreadyCompleted { path: PathBuf },
    #[error("Must be run from Azure Cloud Shell ({var} is not set)")]
    NotCloudShell { var: &'static str },
    #[error("No authenticated session: {reason}")]
    NotAuthenticated { reason: String },
    #[error("Command {program} {args:?} failed with status {status:?}: {stderr}")]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: Option<i32>,
        stderr: String,
    },
    #[error("Malformed {what} returned by {source_hint}: {value:?}")]
    MalformedOutput {
        what: &'static str,
        source_hint: &'static str,
        value: String,
    },
    #[error("Deployment {name} is in state {state:?} - resolve it manually before re-running")]
    DeploymentFailed { name: String, state: String },
    #[error("Placeholder {token} not found in {file}")]
    TokenNotFound { token: String, file: PathBuf },
    #[error("Setup step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<DeployError>,
    },
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DeployError {
    pub fn command_failed<S: Into<String>>(
        program: S,
        args: &[String],
        output: &ToolOutput,
    ) -> Self {
        DeployError::CommandFailed {
            program: program.into(),
            args: args.to_vec(),
            status: output.status,
            stderr: output.stderr.trim().to_owned(),
        }
    }

    pub fn step_failed<S: Into<String>>(step: S, source: DeployError) -> Self {
        DeployError::StepFailed {
            step: step.into(),
            source: Box::new(source),
        }
    }
}
