use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{DeployError, ToolOutput, ToolRunner};

///////////////////////////////////////////////////////////////////////////////
// AzCli
///////////////////////////////////////////////////////////////////////////////

/// Thin builder over the `az` resource management CLI. Responses that carry
/// data are requested as JSON and decoded at this boundary so callers never
/// scrape free-form text.
#[derive(Clone)]
pub struct AzCli {
    runner: Arc<dyn ToolRunner>,
}

/// Subset of `az account show` we consume
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub name: String,
    pub id: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub user: AccountUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountUser {
    pub name: String,
}

impl AzCli {
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self { runner }
    }

    /// Runs `az` and returns the raw output regardless of exit status.
    /// Used where the caller interprets failure itself (deployment
    /// existence probing).
    pub fn run_raw(&self, args: &[&str]) -> Result<ToolOutput, DeployError> {
        let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
        Ok(self.runner.run("az", &args)?)
    }

    /// Runs `az` and fails on a non-zero exit status
    pub fn run_checked(&self, args: &[&str]) -> Result<ToolOutput, DeployError> {
        let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
        let output = self.runner.run("az", &args)?;
        if !output.success() {
            return Err(DeployError::command_failed("az", &args, &output));
        }
        Ok(output)
    }

    ///////////////////////////////////////////////////////////////////////////
    // Identity
    ///////////////////////////////////////////////////////////////////////////

    pub fn account_show(&self) -> Result<AccountInfo, DeployError> {
        let output = self.run_checked(&["account", "show", "--output", "json"])?;
        Ok(serde_json::from_str(&output.stdout)?)
    }

    /// Probes for an authenticated session. The token itself is discarded.
    pub fn get_access_token(&self) -> Result<(), DeployError> {
        let args = ["account", "get-access-token", "--query", "expiresOn", "--output", "tsv"];
        let output = self.run_raw(&args)?;
        if !output.success() {
            return Err(DeployError::NotAuthenticated {
                reason: output.stderr.trim().to_owned(),
            });
        }
        Ok(())
    }

    pub fn signed_in_user_object_id(&self) -> Result<String, DeployError> {
        let output = self.run_checked(&[
            "ad",
            "signed-in-user",
            "show",
            "--query",
            "id",
            "--output",
            "tsv",
        ])?;
        Ok(output.stdout_trimmed().to_owned())
    }

    ///////////////////////////////////////////////////////////////////////////
    // Deployments
    ///////////////////////////////////////////////////////////////////////////

    /// Raw provisioning state query - the resolver interprets both success
    /// and the "could not be found" failure shape
    pub fn deployment_show_state(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ToolOutput, DeployError> {
        self.run_raw(&[
            "deployment",
            "group",
            "show",
            "--resource-group",
            resource_group,
            "--name",
            name,
            "--query",
            "properties.provisioningState",
            "--output",
            "tsv",
        ])
    }

    /// Submits a deployment and blocks until the CLI reports completion
    pub fn deployment_create(
        &self,
        resource_group: &str,
        name: &str,
        template_file: &Path,
        parameters_file: &Path,
    ) -> Result<(), DeployError> {
        let parameters_arg = format!("@{}", parameters_file.display());
        self.run_checked(&[
            "deployment",
            "group",
            "create",
            "--resource-group",
            resource_group,
            "--name",
            name,
            "--template-file",
            &template_file.to_string_lossy(),
            "--parameters",
            &parameters_arg,
            "--output",
            "none",
        ])?;
        Ok(())
    }

    pub fn deployment_outputs(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<serde_json::Value, DeployError> {
        let output = self.run_checked(&[
            "deployment",
            "group",
            "show",
            "--resource-group",
            resource_group,
            "--name",
            name,
            "--query",
            "properties.outputs",
            "--output",
            "json",
        ])?;
        Ok(serde_json::from_str(&output.stdout)?)
    }

    ///////////////////////////////////////////////////////////////////////////
    // Workspace artifacts
    ///////////////////////////////////////////////////////////////////////////

    pub fn synapse_pipeline_create(
        &self,
        workspace: &str,
        name: &str,
        file: &Path,
    ) -> Result<(), DeployError> {
        self.synapse_artifact_create("pipeline", workspace, name, file)
    }

    pub fn synapse_trigger_create(
        &self,
        workspace: &str,
        name: &str,
        file: &Path,
    ) -> Result<(), DeployError> {
        self.synapse_artifact_create("trigger", workspace, name, file)
    }

    pub fn synapse_linked_service_create(
        &self,
        workspace: &str,
        name: &str,
        file: &Path,
    ) -> Result<(), DeployError> {
        self.synapse_artifact_create("linked-service", workspace, name, file)
    }

    pub fn synapse_dataset_create(
        &self,
        workspace: &str,
        name: &str,
        file: &Path,
    ) -> Result<(), DeployError> {
        self.synapse_artifact_create("dataset", workspace, name, file)
    }

    fn synapse_artifact_create(
        &self,
        kind: &str,
        workspace: &str,
        name: &str,
        file: &Path,
    ) -> Result<(), DeployError> {
        let file_arg = format!("@{}", file.display());
        self.run_checked(&[
            "synapse",
            kind,
            "create",
            "--workspace-name",
            workspace,
            "--name",
            name,
            "--file",
            &file_arg,
            "--output",
            "none",
        ])?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////
    // Networking
    ///////////////////////////////////////////////////////////////////////////

    pub fn storage_account_set_default_action(
        &self,
        resource_group: &str,
        account: &str,
        action: &str,
    ) -> Result<(), DeployError> {
        self.run_checked(&[
            "storage",
            "account",
            "update",
            "--resource-group",
            resource_group,
            "--name",
            account,
            "--default-action",
            action,
            "--output",
            "none",
        ])?;
        Ok(())
    }

    pub fn synapse_firewall_rule_create(
        &self,
        resource_group: &str,
        workspace: &str,
        rule: &str,
        start_ip: &str,
        end_ip: &str,
    ) -> Result<(), DeployError> {
        self.run_checked(&[
            "synapse",
            "workspace",
            "firewall-rule",
            "create",
            "--resource-group",
            resource_group,
            "--workspace-name",
            workspace,
            "--name",
            rule,
            "--start-ip-address",
            start_ip,
            "--end-ip-address",
            end_ip,
            "--output",
            "none",
        ])?;
        Ok(())
    }

    pub fn synapse_firewall_rule_delete(
        &self,
        resource_group: &str,
        workspace: &str,
        rule: &str,
    ) -> Result<(), DeployError> {
        self.run_checked(&[
            "synapse",
            "workspace",
            "firewall-rule",
            "delete",
            "--resource-group",
            resource_group,
            "--workspace-name",
            workspace,
            "--name",
            rule,
            "--yes",
            "--output",
            "none",
        ])?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////
    // Storage
    ///////////////////////////////////////////////////////////////////////////

    pub fn storage_blob_upload(
        &self,
        account: &str,
        key: &str,
        container: &str,
        file: &Path,
        blob_name: &str,
    ) -> Result<(), DeployError> {
        self.run_checked(&[
            "storage",
            "blob",
            "upload",
            "--account-name",
            account,
            "--account-key",
            key,
            "--container-name",
            container,
            "--file",
            &file.to_string_lossy(),
            "--name",
            blob_name,
            "--overwrite",
            "--output",
            "none",
        ])?;
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
