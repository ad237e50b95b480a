use std::path::Path;

use serde::Deserialize;

use crate::domain::DeployError;

/// Environment-specific settings read from the variables file at the root of
/// the deployment checkout. Everything else is discovered at run time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployVariables {
    /// Resource group holding the workspace and the data lake
    pub resource_group: String,
    /// Name under which the direct (Bicep) deployment is submitted and
    /// queried
    pub deployment_name: String,
    /// Container in the data lake receiving the sample data
    pub data_container: String,
}

impl DeployVariables {
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let file = std::fs::File::open(path)?;
        let vars = serde_json::from_reader(file)?;
        Ok(vars)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("variables.json");
        std::fs::write(
            &path,
            indoc!(
                r#"
                {
                    "resourceGroup": "synapse-rg",
                    "deploymentName": "synapse-deploy",
                    "dataContainer": "data"
                }
                "#
            ),
        )
        .unwrap();

        let vars = DeployVariables::load(&path).unwrap();
        assert_eq!(vars.resource_group, "synapse-rg");
        assert_eq!(vars.deployment_name, "synapse-deploy");
        assert_eq!(vars.data_container, "data");
    }

    #[test]
    fn test_load_rejects_missing_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("variables.json");
        std::fs::write(&path, r#"{"resourceGroup": "rg"}"#).unwrap();
        assert!(DeployVariables::load(&path).is_err());
    }
}
