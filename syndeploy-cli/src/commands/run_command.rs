use std::sync::Arc;

use console::style;
use slog::{o, Logger};

use syndeploy::domain::{FailureMode, SetupSummary, ToolRunner};
use syndeploy::infra::{DeployLayout, DeployProcedure};

use super::{CLIError, Command};

pub struct RunCommand {
    layout: DeployLayout,
    runner: Arc<dyn ToolRunner>,
    mode: FailureMode,
    host_env: Option<String>,
    show_spinner: bool,
    logger: Logger,
}

impl RunCommand {
    pub fn new(
        layout: &DeployLayout,
        runner: Arc<dyn ToolRunner>,
        mode: FailureMode,
        host_env: Option<String>,
        show_spinner: bool,
        logger: Logger,
    ) -> Self {
        Self {
            layout: layout.clone(),
            runner,
            mode,
            host_env,
            show_spinner,
            logger,
        }
    }

    fn display_summary(&self, summary: &SetupSummary) {
        if summary.is_clean() {
            eprintln!(
                "{}",
                style("Workspace configuration complete").green().bold()
            );
        } else {
            eprintln!(
                "{}: {}",
                style("Workspace configuration finished with failed steps")
                    .yellow()
                    .bold(),
                summary.failed_steps.join(", ")
            );
        }
    }
}

impl Command for RunCommand {
    fn run(&mut self) -> Result<(), CLIError> {
        let procedure = DeployProcedure::new(
            self.layout.clone(),
            self.runner.clone(),
            self.mode,
            self.host_env.clone(),
            self.logger.new(o!()),
        );

        let spinner = if self.show_spinner {
            let s = indicatif::ProgressBar::new_spinner();
            s.set_style(
                indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}"),
            );
            s.set_message("Configuring workspace");
            s.enable_steady_tick(100);
            Some(s)
        } else {
            None
        };

        let result = procedure.run();

        if let Some(s) = spinner {
            s.finish_and_clear();
        }

        let summary = result?;
        self.display_summary(&summary);
        Ok(())
    }
}
