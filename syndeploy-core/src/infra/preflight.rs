use slog::{info, Logger};

use crate::domain::DeployError;

use super::utils::AzCli;
use super::DeployLayout;

/// Environment variable Azure Cloud Shell sets in every session. The
/// procedure assumes the managed shell's pre-authenticated CLI and refuses
/// to run anywhere else.
pub const CLOUD_SHELL_ENV_VAR: &str = "ACC_CLOUD";

/// Validates the execution context before anything is mutated. Each cause
/// fails with its own error and the check itself has no side effects.
pub struct PreflightService {
    layout: DeployLayout,
    az: AzCli,
    logger: Logger,
}

impl PreflightService {
    pub fn new(layout: &DeployLayout, az: AzCli, logger: Logger) -> Self {
        Self {
            layout: layout.clone(),
            az,
            logger,
        }
    }

    /// `host_env` is the value of [`CLOUD_SHELL_ENV_VAR`] as seen by the
    /// caller; passing it in keeps this check independent of process
    /// globals.
    pub fn check(&self, host_env: Option<&str>) -> Result<(), DeployError> {
        if self.layout.is_complete() {
            return Err(DeployError::AlreadyCompleted {
                path: self.layout.sentinel_path.clone(),
            });
        }

        match host_env {
            Some(v) if !v.is_empty() => (),
            _ => {
                return Err(DeployError::NotCloudShell {
                    var: CLOUD_SHELL_ENV_VAR,
                })
            }
        }

        self.az.get_access_token()?;

        info!(self.logger, "Preflight checks passed");
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::FakeToolRunner;

    fn service(root: &std::path::Path, fake: Arc<FakeToolRunner>) -> PreflightService {
        let layout = DeployLayout::create(root).unwrap();
        PreflightService::new(
            &layout,
            AzCli::new(fake),
            Logger::root(slog::Discard, slog::o!()),
        )
    }

    #[test]
    fn test_passes_in_cloud_shell() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), Arc::new(FakeToolRunner::new()));
        assert!(svc.check(Some("PROD")).is_ok());
    }

    #[test]
    fn test_rejects_second_run_before_any_tool_invocation() {
        let tmp = tempfile::tempdir().unwrap();
        let fake = Arc::new(FakeToolRunner::new());
        let layout = DeployLayout::create(tmp.path()).unwrap();
        layout.mark_complete().unwrap();

        let svc = service(tmp.path(), fake.clone());
        let res = svc.check(Some("PROD"));
        assert!(matches!(res, Err(DeployError::AlreadyCompleted { .. })));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_rejects_outside_cloud_shell() {
        let tmp = tempfile::tempdir().unwrap();
        let fake = Arc::new(FakeToolRunner::new());

        let svc = service(tmp.path(), fake.clone());
        assert!(matches!(
            svc.check(None),
            Err(DeployError::NotCloudShell { .. })
        ));
        assert!(matches!(
            svc.check(Some("")),
            Err(DeployError::NotCloudShell { .. })
        ));
        // Shell check precedes the token probe
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_rejects_unauthenticated_session() {
        let tmp = tempfile::tempdir().unwrap();
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(
            &["get-access-token"],
            FakeToolRunner::err(1, "ERROR: Please run 'az login' to setup account."),
        );

        let svc = service(tmp.path(), fake);
        assert!(matches!(
            svc.check(Some("PROD")),
            Err(DeployError::NotAuthenticated { .. })
        ));
    }
}
