use std::path::Path;

use crate::domain::{CloudEnvironment, DeploymentOutputs};
use crate::infra::DeployLayout;

/// Builds a scratch deployment checkout under `root` using the real
/// `templates/` and `data/` payloads shipped at the repository root, plus a
/// variables file. Tests exercising template parameterization therefore
/// catch token drift between code and payloads.
pub fn sample_checkout(root: &Path) -> DeployLayout {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let layout = DeployLayout::create(root).unwrap();

    copy_dir(&repo_root.join("templates"), &layout.templates_dir);
    copy_dir(&repo_root.join("data"), &layout.data_dir);

    std::fs::write(
        &layout.variables_path,
        r#"{
    "resourceGroup": "rg1",
    "deploymentName": "synapse-deploy",
    "dataContainer": "data"
}
"#,
    )
    .unwrap();

    layout
}

pub fn sample_environment() -> CloudEnvironment {
    CloudEnvironment {
        subscription_name: "Sub1".to_owned(),
        subscription_id: "sub-id-1".to_owned(),
        tenant_id: "ten-1".to_owned(),
        username: "user@x.com".to_owned(),
        object_id: "abc-123".to_owned(),
    }
}

pub fn sample_outputs(private_endpoints: bool) -> DeploymentOutputs {
    DeploymentOutputs {
        workspace_name: "ws1".to_owned(),
        sql_pool_name: "pool1".to_owned(),
        sql_admin_login: "sqladmin".to_owned(),
        sql_admin_password: "secret".to_owned(),
        datalake_name: "dl1".to_owned(),
        datalake_key: "KEY==".to_owned(),
        private_endpoints,
    }
}

fn copy_dir(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}
