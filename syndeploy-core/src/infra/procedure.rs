use std::sync::Arc;

use slog::{info, o, Logger};

use crate::domain::{DeployError, FailureMode, SetupSummary, ToolRunner};

use super::setup::{default_steps, SetupContext, SetupRunner};
use super::utils::{AzCli, SqlCmd};
use super::{
    DeployLayout, DeployVariables, DeploymentResolver, DiscoveryService, FirewallToggle,
    PreflightService, TemplateEngine,
};

/// Working name of the parameterized infrastructure parameter file
pub const PARAMETERS_TEMPLATE: &str = "azuredeploy.parameters.json";

///////////////////////////////////////////////////////////////////////////////
// DeployProcedure
///////////////////////////////////////////////////////////////////////////////

/// The one linear orchestration, executed once per environment:
/// preflight, discovery, parameter file templating, deployment resolution,
/// output extraction, conditional firewall relaxation, the configuration
/// steps in order, firewall restoration, and finally the completion
/// sentinel. The sentinel is only written after every step has run.
pub struct DeployProcedure {
    layout: DeployLayout,
    runner: Arc<dyn ToolRunner>,
    mode: FailureMode,
    /// Value of the managed-shell signature variable as seen by the caller
    host_env: Option<String>,
    logger: Logger,
}

impl DeployProcedure {
    pub fn new(
        layout: DeployLayout,
        runner: Arc<dyn ToolRunner>,
        mode: FailureMode,
        host_env: Option<String>,
        logger: Logger,
    ) -> Self {
        Self {
            layout,
            runner,
            mode,
            host_env,
            logger,
        }
    }

    pub fn run(&self) -> Result<SetupSummary, DeployError> {
        let az = AzCli::new(self.runner.clone());
        let sql = SqlCmd::new(self.runner.clone());
        let templates = TemplateEngine::new(&self.layout);

        PreflightService::new(&self.layout, az.clone(), self.logger.new(o!()))
            .check(self.host_env.as_deref())?;

        let vars = DeployVariables::load(&self.layout.variables_path)?;
        let env = DiscoveryService::new(az.clone(), self.logger.new(o!())).discover()?;

        // Rewrite the infrastructure parameter file with the discovered
        // identity before any deployment decision is made
        let parameters_file = templates.render(
            PARAMETERS_TEMPLATE,
            &[
                ("azureUser", &env.username),
                ("azureObjectId", &env.object_id),
                ("azureSubscriptionID", &env.subscription_id),
            ],
        )?;

        let resolver = DeploymentResolver::new(
            &self.layout,
            &vars,
            az.clone(),
            self.runner.clone(),
            self.logger.new(o!()),
        );
        let deployment_type = resolver.resolve(&parameters_file)?;
        let outputs = resolver.extract_outputs(deployment_type)?;
        info!(self.logger, "Resolved deployment";
            "type" => ?deployment_type,
            "workspace" => &outputs.workspace_name,
            "private_endpoints" => outputs.private_endpoints);

        let firewall = FirewallToggle::new(&vars, az.clone(), self.logger.new(o!()));
        if outputs.private_endpoints {
            firewall.open(&outputs)?;
        }

        let ctx = SetupContext {
            layout: &self.layout,
            vars: &vars,
            env: &env,
            outputs: &outputs,
            templates: &templates,
            az: &az,
            sql: &sql,
            logger: &self.logger,
        };
        let summary =
            SetupRunner::new(self.mode, self.logger.new(o!())).run(&ctx, &default_steps())?;

        if outputs.private_endpoints {
            firewall.close(&outputs)?;
        }

        self.layout.mark_complete()?;
        info!(self.logger, "Setup complete";
            "steps" => summary.steps_run,
            "failed" => summary.failed_steps.len());
        Ok(summary)
    }
}
