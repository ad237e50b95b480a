use slog::{info, Logger};

use crate::domain::{DeployError, DeploymentOutputs};

use super::utils::AzCli;
use super::DeployVariables;

/// Name of the temporary workspace firewall rule created for the duration
/// of setup
pub const SETUP_FIREWALL_RULE: &str = "SetupAllowAll";

const OPEN_START_IP: &str = "0.0.0.0";
const OPEN_END_IP: &str = "0.0.0.0";

/// Temporarily relaxes network access when the environment was provisioned
/// with private endpoints, so the configuration steps can reach the
/// workspace and the lake from the shell.
///
/// The toggle assumes the deny-by-default starting state the infrastructure
/// templates produce; it does not snapshot or restore any pre-existing
/// rules.
pub struct FirewallToggle {
    vars: DeployVariables,
    az: AzCli,
    logger: Logger,
}

impl FirewallToggle {
    pub fn new(vars: &DeployVariables, az: AzCli, logger: Logger) -> Self {
        Self {
            vars: vars.clone(),
            az,
            logger,
        }
    }

    pub fn open(&self, outputs: &DeploymentOutputs) -> Result<(), DeployError> {
        info!(self.logger, "Relaxing network access for setup";
            "workspace" => &outputs.workspace_name,
            "datalake" => &outputs.datalake_name);

        self.az.storage_account_set_default_action(
            &self.vars.resource_group,
            &outputs.datalake_name,
            "Allow",
        )?;
        self.az.synapse_firewall_rule_create(
            &self.vars.resource_group,
            &outputs.workspace_name,
            SETUP_FIREWALL_RULE,
            OPEN_START_IP,
            OPEN_END_IP,
        )?;
        Ok(())
    }

    pub fn close(&self, outputs: &DeploymentOutputs) -> Result<(), DeployError> {
        info!(self.logger, "Restoring network access restrictions");

        self.az.storage_account_set_default_action(
            &self.vars.resource_group,
            &outputs.datalake_name,
            "Deny",
        )?;
        self.az.synapse_firewall_rule_delete(
            &self.vars.resource_group,
            &outputs.workspace_name,
            SETUP_FIREWALL_RULE,
        )?;
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

    fn outputs() -> DeploymentOutputs {
        DeploymentOutputs {
            workspace_name: "ws1".to_owned(),
            sql_pool_name: "pool1".to_owned(),
            sql_admin_login: "sqladmin".to_owned(),
            sql_admin_password: "secret".to_owned(),
            datalake_name: "dl1".to_owned(),
            datalake_key: "KEY==".to_owned(),
            private_endpoints: true,
        }
    }

    fn toggle(fake: Arc<FakeToolRunner>) -> FirewallToggle {
        let vars = DeployVariables {
            resource_group: "rg1".to_owned(),
            deployment_name: "synapse-deploy".to_owned(),
            data_container: "data".to_owned(),
        };
        FirewallToggle::new(
            &vars,
            AzCli::new(fake),
            Logger::root(slog::Discard, slog::o!()),
        )
    }

    #[test]
    fn test_open_then_close_reverts_both_changes() {
        let fake = Arc::new(FakeToolRunner::new());
        let toggle = toggle(fake.clone());

        toggle.open(&outputs()).unwrap();
        toggle.close(&outputs()).unwrap();

        assert_eq!(fake.count_calls(&["storage", "account", "update"]), 2);
        assert!(fake.find_call(&["--default-action", "Allow"]).is_some());
        assert!(fake.find_call(&["--default-action", "Deny"]).is_some());
        assert!(fake
            .find_call(&["firewall-rule", "create", SETUP_FIREWALL_RULE])
            .is_some());
        assert!(fake
            .find_call(&["firewall-rule", "delete", SETUP_FIREWALL_RULE])
            .is_some());
    }

    #[test]
    fn test_open_failure_propagates() {
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(
            &["firewall-rule", "create"],
            FakeToolRunner::err(1, "conflict"),
        );

        let toggle = toggle(fake);
        assert!(toggle.open(&outputs()).is_err());
    }
}
