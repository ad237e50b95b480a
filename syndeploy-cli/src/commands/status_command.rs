use console::style;

use syndeploy::infra::{DeployLayout, DeployVariables};

use super::{CLIError, Command};

pub struct StatusCommand {
    layout: DeployLayout,
}

impl StatusCommand {
    pub fn new(layout: &DeployLayout) -> Self {
        Self {
            layout: layout.clone(),
        }
    }
}

impl Command for StatusCommand {
    fn run(&mut self) -> Result<(), CLIError> {
        let vars = DeployVariables::load(&self.layout.variables_path)?;

        let flavor = if self.layout.tfstate_path.is_file() {
            "terraform"
        } else {
            "bicep"
        };

        println!("Checkout: {}", self.layout.root_dir.display());
        println!("Resource group: {}", vars.resource_group);
        println!("Deployment: {} ({})", vars.deployment_name, flavor);
        println!("Data container: {}", vars.data_container);

        if self.layout.is_complete() {
            println!("State: {}", style("configured").green());
        } else {
            println!("State: {}", style("not configured").yellow());
        }

        Ok(())
    }
}
