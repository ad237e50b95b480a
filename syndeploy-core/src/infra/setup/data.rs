use slog::info;

use crate::domain::DeployError;

use super::{SetupContext, SetupStep};

pub const INGESTION_METADATA_TEMPLATE: &str = "ingestion_metadata.csv";
pub const INGESTION_METADATA_BLOB: &str = "metadata/ingestion_metadata.csv";

/// Sample data files shipped in the checkout, uploaded as
/// `<stem>/<file>` so each lands in its own folder for the parquet views
pub const SAMPLE_DATA_FILES: &[&str] = &["sale_small.csv", "customers.csv"];

///////////////////////////////////////////////////////////////////////////////
// SampleDataStep
///////////////////////////////////////////////////////////////////////////////

/// Uploads the parameterized ingestion metadata file and the sample
/// datasets into the lake container the import pipeline reads from
pub struct SampleDataStep;

impl SetupStep for SampleDataStep {
    fn name(&self) -> &'static str {
        "upload sample data"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        let metadata = ctx.templates.render(
            INGESTION_METADATA_TEMPLATE,
            &[
                ("datalakeName", &ctx.outputs.datalake_name),
                ("dataContainer", &ctx.vars.data_container),
            ],
        )?;
        ctx.az.storage_blob_upload(
            &ctx.outputs.datalake_name,
            &ctx.outputs.datalake_key,
            &ctx.vars.data_container,
            &metadata,
            INGESTION_METADATA_BLOB,
        )?;

        for file in SAMPLE_DATA_FILES {
            let path = ctx.layout.data_dir.join(file);
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file)
                .to_owned();
            let blob_name = format!("{}/{}", stem, file);

            info!(ctx.logger, "Uploading sample dataset";
                "file" => %path.display(), "blob" => &blob_name);
            ctx.az.storage_blob_upload(
                &ctx.outputs.datalake_name,
                &ctx.outputs.datalake_key,
                &ctx.vars.data_container,
                &path,
                &blob_name,
            )?;
        }
        Ok(())
    }
}
