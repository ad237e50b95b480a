use slog::{info, warn, Logger};

use crate::domain::{
    CloudEnvironment, DeployError, DeploymentOutputs, FailureMode, SetupSummary,
};

use super::utils::{AzCli, SqlCmd};
use super::{DeployLayout, DeployVariables, TemplateEngine};

mod database;
pub use database::*;

mod integration;
pub use integration::*;

mod data;
pub use data::*;

///////////////////////////////////////////////////////////////////////////////
// SetupStep
///////////////////////////////////////////////////////////////////////////////

/// Everything a configuration step may need. Steps are pure functions of
/// this context plus the results of the external calls they make.
pub struct SetupContext<'a> {
    pub layout: &'a DeployLayout,
    pub vars: &'a DeployVariables,
    pub env: &'a CloudEnvironment,
    pub outputs: &'a DeploymentOutputs,
    pub templates: &'a TemplateEngine,
    pub az: &'a AzCli,
    pub sql: &'a SqlCmd,
    pub logger: &'a Logger,
}

/// One post-deployment configuration action. Steps are individually
/// idempotent against the control plane but the sequence as a whole is
/// ordered - artifacts reference resources created by earlier steps.
pub trait SetupStep {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError>;
}

/// The documented step order. The linked service precedes the pipelines
/// that reference it; triggers follow the pipelines they bind to.
pub fn default_steps() -> Vec<Box<dyn SetupStep>> {
    vec![
        Box::new(ResultSetCachingStep),
        Box::new(LinkedServiceStep),
        Box::new(PipelinesStep),
        Box::new(TriggersStep),
        Box::new(LoggingSchemaStep),
        Box::new(ResourceClassLoginsStep),
        Box::new(SampleDataStep),
        Box::new(ServerlessDatabaseStep),
    ]
}

///////////////////////////////////////////////////////////////////////////////
// SetupRunner
///////////////////////////////////////////////////////////////////////////////

/// Executes the configuration steps in order. Strict mode stops at the
/// first failure; best-effort mode runs everything and reports the failures
/// in the summary.
pub struct SetupRunner {
    mode: FailureMode,
    logger: Logger,
}

impl SetupRunner {
    pub fn new(mode: FailureMode, logger: Logger) -> Self {
        Self { mode, logger }
    }

    pub fn run(
        &self,
        ctx: &SetupContext,
        steps: &[Box<dyn SetupStep>],
    ) -> Result<SetupSummary, DeployError> {
        let mut summary = SetupSummary::default();

        for step in steps {
            info!(self.logger, "Running setup step"; "step" => step.name());
            match step.run(ctx) {
                Ok(()) => summary.steps_run += 1,
                Err(e) => match self.mode {
                    FailureMode::Strict => {
                        return Err(DeployError::step_failed(step.name(), e));
                    }
                    FailureMode::BestEffort => {
                        warn!(self.logger, "Setup step failed, continuing";
                            "step" => step.name(), "error" => %e);
                        summary.steps_run += 1;
                        summary.failed_steps.push(step.name().to_owned());
                    }
                },
            }
        }

        Ok(summary)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_checkout, FakeToolRunner};
    use std::sync::Arc;

    struct FailingStep;
    impl SetupStep for FailingStep {
        fn name(&self) -> &'static str {
            "failing step"
        }
        fn run(&self, _ctx: &SetupContext) -> Result<(), DeployError> {
            Err(DeployError::NotAuthenticated {
                reason: "scripted".to_owned(),
            })
        }
    }

    struct NoopStep;
    impl SetupStep for NoopStep {
        fn name(&self) -> &'static str {
            "noop step"
        }
        fn run(&self, _ctx: &SetupContext) -> Result<(), DeployError> {
            Ok(())
        }
    }

    fn with_context<F: FnOnce(&SetupContext)>(f: F) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = sample_checkout(tmp.path());
        let fake: Arc<FakeToolRunner> = Arc::new(FakeToolRunner::new());
        let vars = DeployVariables::load(&layout.variables_path).unwrap();
        let env = crate::testing::sample_environment();
        let outputs = crate::testing::sample_outputs(false);
        let templates = TemplateEngine::new(&layout);
        let az = AzCli::new(fake.clone());
        let sql = SqlCmd::new(fake);
        let logger = Logger::root(slog::Discard, slog::o!());
        f(&SetupContext {
            layout: &layout,
            vars: &vars,
            env: &env,
            outputs: &outputs,
            templates: &templates,
            az: &az,
            sql: &sql,
            logger: &logger,
        });
    }

    #[test]
    fn test_strict_mode_stops_at_first_failure() {
        with_context(|ctx| {
            let steps: Vec<Box<dyn SetupStep>> =
                vec![Box::new(NoopStep), Box::new(FailingStep), Box::new(NoopStep)];
            let runner = SetupRunner::new(
                FailureMode::Strict,
                Logger::root(slog::Discard, slog::o!()),
            );
            match runner.run(ctx, &steps) {
                Err(DeployError::StepFailed { step, .. }) => {
                    assert_eq!(step, "failing step");
                }
                other => panic!("unexpected: {:?}", other),
            }
        });
    }

    #[test]
    fn test_best_effort_mode_runs_everything() {
        with_context(|ctx| {
            let steps: Vec<Box<dyn SetupStep>> =
                vec![Box::new(NoopStep), Box::new(FailingStep), Box::new(NoopStep)];
            let runner = SetupRunner::new(
                FailureMode::BestEffort,
                Logger::root(slog::Discard, slog::o!()),
            );
            let summary = runner.run(ctx, &steps).unwrap();
            assert_eq!(summary.steps_run, 3);
            assert_eq!(summary.failed_steps, vec!["failing step".to_owned()]);
            assert!(!summary.is_clean());
        });
    }

    #[test]
    fn test_default_step_order() {
        let names: Vec<&str> = default_steps().iter().map(|s| s.name()).collect();
        // The linked service must precede the pipelines referencing it and
        // triggers must follow the pipelines they bind to
        let linked = names
            .iter()
            .position(|n| *n == LinkedServiceStep.name())
            .unwrap();
        let pipelines = names
            .iter()
            .position(|n| *n == PipelinesStep.name())
            .unwrap();
        let triggers = names
            .iter()
            .position(|n| *n == TriggersStep.name())
            .unwrap();
        assert!(linked < pipelines);
        assert!(pipelines < triggers);
    }
}
