use std::path::{Path, PathBuf};

/// Describes the layout of the deployment directory on disk
#[derive(Debug, Clone)]
pub struct DeployLayout {
    /// Root directory of the deployment checkout
    pub root_dir: PathBuf,
    /// Contains the `.tmpl` payload files (pipeline/trigger/dataset JSON,
    /// SQL scripts, metadata CSV, infrastructure parameter file)
    pub templates_dir: PathBuf,
    /// Sample data files uploaded to the lake during setup
    pub data_dir: PathBuf,
    /// Working directory where `.tmpl` files are materialized before
    /// parameterization. Substitution is destructive, so it never touches
    /// the originals under `templates_dir`.
    pub artifacts_dir: PathBuf,
    /// Directory for storing per-run diagnostics information and logs
    pub run_info_dir: PathBuf,
    /// Variables file describing the target resource group and deployment
    pub variables_path: PathBuf,
    /// Infrastructure template submitted on the direct deployment path.
    /// Maintained by the infrastructure repo - an opaque collaborator here.
    pub arm_template_path: PathBuf,
    /// Terraform state file; its presence selects the Terraform branch of
    /// deployment resolution
    pub tfstate_path: PathBuf,
    /// Completion marker; its presence rejects any further run
    pub sentinel_path: PathBuf,
}

impl DeployLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root_dir: root.to_owned(),
            templates_dir: root.join("templates"),
            data_dir: root.join("data"),
            artifacts_dir: root.join(".syndeploy").join("artifacts"),
            run_info_dir: root.join(".syndeploy").join("run"),
            variables_path: root.join("variables.json"),
            arm_template_path: root.join("azuredeploy.json"),
            tfstate_path: root.join("terraform.tfstate"),
            sentinel_path: root.join("deploySynapse.complete"),
        }
    }

    pub fn create(root: &Path) -> Result<Self, std::io::Error> {
        let layout = Self::new(root);
        std::fs::create_dir_all(&layout.artifacts_dir)?;
        std::fs::create_dir_all(&layout.run_info_dir)?;
        Ok(layout)
    }

    pub fn is_complete(&self) -> bool {
        self.sentinel_path.exists()
    }

    /// Writes the completion marker. Last action of a run - the marker
    /// gates the whole procedure, not individual steps.
    pub fn mark_complete(&self) -> Result<(), std::io::Error> {
        std::fs::write(&self.sentinel_path, b"")
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DeployLayout::create(tmp.path()).unwrap();
        assert!(!layout.is_complete());
        layout.mark_complete().unwrap();
        assert!(layout.is_complete());
    }

    #[test]
    fn test_create_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        DeployLayout::create(tmp.path()).unwrap();
        let layout = DeployLayout::create(tmp.path()).unwrap();
        assert!(layout.artifacts_dir.is_dir());
        assert!(layout.run_info_dir.is_dir());
    }
}
