use std::sync::Arc;

use slog::Logger;

use syndeploy::domain::{DeployError, FailureMode};
use syndeploy::testing::*;
use syndeploy_cli::commands::*;
use syndeploy_cli::error::CLIError;

fn discard_logger() -> Logger {
    Logger::root(slog::Discard, slog::o!())
}

#[test]
fn test_status_command_reads_checkout() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = sample_checkout(tmp.path());

    let mut cmd = StatusCommand::new(&layout);
    cmd.run().unwrap();

    layout.mark_complete().unwrap();
    let mut cmd = StatusCommand::new(&layout);
    cmd.run().unwrap();
}

#[test]
fn test_run_command_requires_cloud_shell() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = sample_checkout(tmp.path());
    let fake = Arc::new(FakeToolRunner::new());

    let mut cmd = RunCommand::new(
        &layout,
        fake.clone(),
        FailureMode::Strict,
        None,
        false,
        discard_logger(),
    );

    match cmd.run() {
        Err(CLIError::DeployError(DeployError::NotCloudShell { .. })) => (),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(fake.calls().is_empty());
}

#[test]
fn test_run_command_happy_path() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = sample_checkout(tmp.path());
    let fake = Arc::new(FakeToolRunner::new());
    fake.on(
        &["account", "show"],
        FakeToolRunner::ok(
            r#"{"name": "Sub1", "id": "sub-id-1", "tenantId": "ten-1", "user": {"name": "user@x.com"}}"#,
        ),
    );
    fake.on(&["signed-in-user"], FakeToolRunner::ok("abc-123\n"));
    fake.on(
        &["properties.provisioningState"],
        FakeToolRunner::ok("Succeeded\n"),
    );
    fake.on(
        &["properties.outputs"],
        FakeToolRunner::ok(
            r#"{
                "workspaceName": {"value": "ws1"},
                "sqlPoolName": {"value": "pool1"},
                "sqlAdminLogin": {"value": "sqladmin"},
                "sqlAdminPassword": {"value": "secret"},
                "datalakeName": {"value": "dl1"},
                "datalakeKey": {"value": "KEY=="},
                "privateEndpoints": {"value": "false"}
            }"#,
        ),
    );

    let mut cmd = RunCommand::new(
        &layout,
        fake,
        FailureMode::Strict,
        Some("PROD".to_owned()),
        false,
        discard_logger(),
    );

    cmd.run().unwrap();
    assert!(layout.is_complete());
}
