use std::path::PathBuf;

use syndeploy::domain::DeployError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CLIError {
    #[error("{0}")]
    DeployError(#[from] DeployError),
    #[error("Directory is not a deployment checkout (no variables.json found): {path}")]
    NotInCheckout { path: PathBuf },
    #[error("IO error: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
