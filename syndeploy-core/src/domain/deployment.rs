///////////////////////////////////////////////////////////////////////////////
// Deployment
///////////////////////////////////////////////////////////////////////////////

/// Which infrastructure-as-code mechanism produced the deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentType {
    Terraform,
    Bicep,
}

/// Connection details of the provisioned resources, extracted from whichever
/// deployment mechanism was used. All values are opaque strings except for
/// the private endpoints flag, which is decoded once at the boundary.
#[derive(Debug, Clone)]
pub struct DeploymentOutputs {
    pub workspace_name: String,
    pub sql_pool_name: String,
    pub sql_admin_login: String,
    pub sql_admin_password: String,
    pub datalake_name: String,
    pub datalake_key: String,
    pub private_endpoints: bool,
}

impl DeploymentOutputs {
    /// Dedicated SQL endpoint of the workspace
    pub fn sql_endpoint(&self) -> String {
        format!("{}.sql.azuresynapse.net", self.workspace_name)
    }

    /// Serverless (on-demand) SQL endpoint of the workspace
    pub fn serverless_sql_endpoint(&self) -> String {
        format!("{}-ondemand.sql.azuresynapse.net", self.workspace_name)
    }

    /// Blob endpoint of the attached data lake account
    pub fn datalake_blob_endpoint(&self) -> String {
        format!("https://{}.blob.core.windows.net", self.datalake_name)
    }

    /// DFS endpoint of the attached data lake account
    pub fn datalake_dfs_endpoint(&self) -> String {
        format!("https://{}.dfs.core.windows.net", self.datalake_name)
    }
}

/// Decodes the loosely-typed private endpoints flag the deployment tooling
/// reports. Only the exact text "true" enables it - any other value means
/// public networking.
pub fn parse_private_endpoints_flag(raw: &str) -> bool {
    raw.trim() == "true"
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_endpoints_flag_decoding() {
        assert!(parse_private_endpoints_flag("true"));
        assert!(parse_private_endpoints_flag(" true\n"));
        assert!(!parse_private_endpoints_flag("True"));
        assert!(!parse_private_endpoints_flag("false"));
        assert!(!parse_private_endpoints_flag(""));
        assert!(!parse_private_endpoints_flag("1"));
    }

    #[test]
    fn test_endpoints() {
        let outputs = DeploymentOutputs {
            workspace_name: "ws1".to_owned(),
            sql_pool_name: "pool1".to_owned(),
            sql_admin_login: "sqladmin".to_owned(),
            sql_admin_password: "secret".to_owned(),
            datalake_name: "dl1".to_owned(),
            datalake_key: "KEY==".to_owned(),
            private_endpoints: false,
        };
        assert_eq!(outputs.sql_endpoint(), "ws1.sql.azuresynapse.net");
        assert_eq!(
            outputs.serverless_sql_endpoint(),
            "ws1-ondemand.sql.azuresynapse.net"
        );
        assert_eq!(
            outputs.datalake_blob_endpoint(),
            "https://dl1.blob.core.windows.net"
        );
    }
}
