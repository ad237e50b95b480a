use slog::info;

use crate::domain::DeployError;

use super::{SetupContext, SetupStep};

pub const LINKED_SERVICE_TEMPLATE: &str = "linked_service_datalake.json";
pub const DATASET_TEMPLATE: &str = "dataset_sample_parquet.json";
pub const IMPORT_PIPELINE_TEMPLATE: &str = "pipeline_import_sample_data.json";
pub const PAUSE_PIPELINE_TEMPLATE: &str = "pipeline_pause_sql_pool.json";
pub const IMPORT_TRIGGER_TEMPLATE: &str = "trigger_import_sample_data.json";
pub const PAUSE_TRIGGER_TEMPLATE: &str = "trigger_pause_sql_pool.json";

pub const LINKED_SERVICE_NAME: &str = "DataLakeStorage";
pub const DATASET_NAME: &str = "SampleParquet";
pub const IMPORT_PIPELINE_NAME: &str = "ImportSampleData";
pub const PAUSE_PIPELINE_NAME: &str = "PauseSqlPool";
pub const IMPORT_TRIGGER_NAME: &str = "TriggerImportSampleData";
pub const PAUSE_TRIGGER_NAME: &str = "TriggerPauseSqlPool";

///////////////////////////////////////////////////////////////////////////////
// LinkedServiceStep
///////////////////////////////////////////////////////////////////////////////

/// Registers the managed-identity connection to the data lake and the
/// parquet dataset definition over it. Runs before the pipelines that
/// reference both by name.
pub struct LinkedServiceStep;

impl SetupStep for LinkedServiceStep {
    fn name(&self) -> &'static str {
        "register data lake linked service"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        let linked_service = ctx.templates.render(
            LINKED_SERVICE_TEMPLATE,
            &[("datalakeName", &ctx.outputs.datalake_name)],
        )?;
        ctx.az.synapse_linked_service_create(
            &ctx.outputs.workspace_name,
            LINKED_SERVICE_NAME,
            &linked_service,
        )?;

        let dataset = ctx.templates.render(
            DATASET_TEMPLATE,
            &[("dataContainer", &ctx.vars.data_container)],
        )?;
        ctx.az
            .synapse_dataset_create(&ctx.outputs.workspace_name, DATASET_NAME, &dataset)
    }
}

///////////////////////////////////////////////////////////////////////////////
// PipelinesStep
///////////////////////////////////////////////////////////////////////////////

/// Templates and registers the two pipelines: sample data import and the
/// scheduled pool pause with run logging
pub struct PipelinesStep;

impl SetupStep for PipelinesStep {
    fn name(&self) -> &'static str {
        "create pipelines"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        info!(ctx.logger, "Registering pipelines";
            "workspace" => &ctx.outputs.workspace_name);

        // The import pipeline addresses the lake through its full resource
        // id, hence the subscription id (not the display name). The group
        // placeholder carries an `azure` prefix so it is not a substring of
        // the literal `resourceGroups/` path segment around it.
        let import = ctx.templates.render(
            IMPORT_PIPELINE_TEMPLATE,
            &[
                ("azureSubscriptionID", &ctx.env.subscription_id),
                ("azureResourceGroup", &ctx.vars.resource_group),
                ("datalakeName", &ctx.outputs.datalake_name),
                ("dataContainer", &ctx.vars.data_container),
            ],
        )?;
        ctx.az.synapse_pipeline_create(
            &ctx.outputs.workspace_name,
            IMPORT_PIPELINE_NAME,
            &import,
        )?;

        let pause = ctx.templates.render(
            PAUSE_PIPELINE_TEMPLATE,
            &[
                ("azureSubscriptionID", &ctx.env.subscription_id),
                ("azureResourceGroup", &ctx.vars.resource_group),
                ("synapseWorkspaceName", &ctx.outputs.workspace_name),
                ("sqlPoolName", &ctx.outputs.sql_pool_name),
            ],
        )?;
        ctx.az
            .synapse_pipeline_create(&ctx.outputs.workspace_name, PAUSE_PIPELINE_NAME, &pause)
    }
}

///////////////////////////////////////////////////////////////////////////////
// TriggersStep
///////////////////////////////////////////////////////////////////////////////

/// Registers the schedule triggers binding to the pipelines created above
pub struct TriggersStep;

impl SetupStep for TriggersStep {
    fn name(&self) -> &'static str {
        "create triggers"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        let import = ctx.templates.render(IMPORT_TRIGGER_TEMPLATE, &[])?;
        ctx.az.synapse_trigger_create(
            &ctx.outputs.workspace_name,
            IMPORT_TRIGGER_NAME,
            &import,
        )?;

        let pause = ctx.templates.render(PAUSE_TRIGGER_TEMPLATE, &[])?;
        ctx.az
            .synapse_trigger_create(&ctx.outputs.workspace_name, PAUSE_TRIGGER_NAME, &pause)
    }
}
