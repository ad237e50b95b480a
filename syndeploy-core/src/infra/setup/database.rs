use slog::info;

use crate::domain::DeployError;
use crate::infra::utils::SqlTarget;

use super::{SetupContext, SetupStep};

pub const LOGGING_SCHEMA_TEMPLATE: &str = "sql/create_logging.sql";
pub const RESOURCE_CLASS_LOGINS_TEMPLATE: &str = "sql/create_resource_class_logins.sql";
pub const RESOURCE_CLASS_USERS_TEMPLATE: &str = "sql/create_resource_class_users.sql";
pub const SERVERLESS_VIEWS_TEMPLATE: &str = "sql/create_serverless_views.sql";

/// Name of the on-demand database layered over the lake files
pub const SERVERLESS_DATABASE: &str = "ServerlessAnalytics";

fn master_target(ctx: &SetupContext) -> SqlTarget {
    SqlTarget {
        server: ctx.outputs.sql_endpoint(),
        database: "master".to_owned(),
        login: ctx.outputs.sql_admin_login.clone(),
        password: ctx.outputs.sql_admin_password.clone(),
    }
}

fn pool_target(ctx: &SetupContext) -> SqlTarget {
    SqlTarget {
        server: ctx.outputs.sql_endpoint(),
        database: ctx.outputs.sql_pool_name.clone(),
        login: ctx.outputs.sql_admin_login.clone(),
        password: ctx.outputs.sql_admin_password.clone(),
    }
}

fn serverless_target(ctx: &SetupContext, database: &str) -> SqlTarget {
    SqlTarget {
        server: ctx.outputs.serverless_sql_endpoint(),
        database: database.to_owned(),
        login: ctx.outputs.sql_admin_login.clone(),
        password: ctx.outputs.sql_admin_password.clone(),
    }
}

///////////////////////////////////////////////////////////////////////////////
// ResultSetCachingStep
///////////////////////////////////////////////////////////////////////////////

/// Turns on result set caching for the dedicated pool. Must execute against
/// master - the feature flag cannot be set from within the pool database
/// itself.
pub struct ResultSetCachingStep;

impl SetupStep for ResultSetCachingStep {
    fn name(&self) -> &'static str {
        "enable result set caching"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        let query = format!(
            "ALTER DATABASE [{}] SET RESULT_SET_CACHING ON",
            ctx.outputs.sql_pool_name
        );
        ctx.sql.execute_query(&master_target(ctx), &query)
    }
}

///////////////////////////////////////////////////////////////////////////////
// LoggingSchemaStep
///////////////////////////////////////////////////////////////////////////////

/// Creates the logging schema and tables the pause/logging pipeline writes
/// into
pub struct LoggingSchemaStep;

impl SetupStep for LoggingSchemaStep {
    fn name(&self) -> &'static str {
        "create logging schema"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        let script = ctx.templates.render(LOGGING_SCHEMA_TEMPLATE, &[])?;
        ctx.sql.execute_script(&pool_target(ctx), &script)
    }
}

///////////////////////////////////////////////////////////////////////////////
// ResourceClassLoginsStep
///////////////////////////////////////////////////////////////////////////////

/// Provisions the workload-management logins (master) and their users in
/// the pool database
pub struct ResourceClassLoginsStep;

impl SetupStep for ResourceClassLoginsStep {
    fn name(&self) -> &'static str {
        "create resource class logins"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        let logins = ctx.templates.render(
            RESOURCE_CLASS_LOGINS_TEMPLATE,
            &[("sqlAdminPassword", &ctx.outputs.sql_admin_password)],
        )?;
        ctx.sql.execute_script(&master_target(ctx), &logins)?;

        let users = ctx.templates.render(RESOURCE_CLASS_USERS_TEMPLATE, &[])?;
        ctx.sql.execute_script(&pool_target(ctx), &users)
    }
}

///////////////////////////////////////////////////////////////////////////////
// ServerlessDatabaseStep
///////////////////////////////////////////////////////////////////////////////

/// Creates the serverless database and its views over the lake files
pub struct ServerlessDatabaseStep;

impl SetupStep for ServerlessDatabaseStep {
    fn name(&self) -> &'static str {
        "create serverless database"
    }

    fn run(&self, ctx: &SetupContext) -> Result<(), DeployError> {
        info!(ctx.logger, "Creating serverless database";
            "database" => SERVERLESS_DATABASE);

        let create = format!(
            "IF DB_ID('{db}') IS NULL CREATE DATABASE [{db}]",
            db = SERVERLESS_DATABASE
        );
        ctx.sql
            .execute_query(&serverless_target(ctx, "master"), &create)?;

        let views = ctx.templates.render(
            SERVERLESS_VIEWS_TEMPLATE,
            &[
                ("datalakeName", &ctx.outputs.datalake_name),
                ("dataContainer", &ctx.vars.data_container),
            ],
        )?;
        ctx.sql
            .execute_script(&serverless_target(ctx, SERVERLESS_DATABASE), &views)
    }
}
