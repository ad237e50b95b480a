use slog::{info, Logger};

use crate::domain::{CloudEnvironment, DeployError};

use super::utils::AzCli;

/// Captures identity and subscription details from the authenticated
/// session. Pure read - and unlike the token probe, a malformed or empty
/// value here is a hard failure, since every later step interpolates these
/// values into payloads.
pub struct DiscoveryService {
    az: AzCli,
    logger: Logger,
}

impl DiscoveryService {
    pub fn new(az: AzCli, logger: Logger) -> Self {
        Self { az, logger }
    }

    pub fn discover(&self) -> Result<CloudEnvironment, DeployError> {
        let account = self.az.account_show()?;
        let object_id = self.az.signed_in_user_object_id()?;

        let env = CloudEnvironment {
            subscription_name: account.name,
            subscription_id: account.id,
            tenant_id: account.tenant_id,
            username: account.user.name,
            object_id,
        };

        for &(what, value) in [
            ("subscription name", &env.subscription_name),
            ("subscription id", &env.subscription_id),
            ("tenant id", &env.tenant_id),
            ("username", &env.username),
            ("object id", &env.object_id),
        ]
        .iter()
        {
            if value.trim().is_empty() {
                return Err(DeployError::MalformedOutput {
                    what,
                    source_hint: "az account/ad queries",
                    value: value.clone(),
                });
            }
        }

        info!(self.logger, "Discovered environment";
            "subscription" => &env.subscription_name,
            "user" => &env.username);
        Ok(env)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::FakeToolRunner;

    fn discard_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn test_discover() {
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(
            &["account", "show"],
            FakeToolRunner::ok(
                r#"{"name": "Sub1", "id": "sub-id-1", "tenantId": "ten-1", "user": {"name": "user@x.com"}}"#,
            ),
        );
        fake.on(&["signed-in-user"], FakeToolRunner::ok("abc-123\n"));

        let env = DiscoveryService::new(AzCli::new(fake), discard_logger())
            .discover()
            .unwrap();
        assert_eq!(env.subscription_name, "Sub1");
        assert_eq!(env.subscription_id, "sub-id-1");
        assert_eq!(env.username, "user@x.com");
        assert_eq!(env.object_id, "abc-123");
    }

    #[test]
    fn test_empty_object_id_is_a_hard_failure() {
        let fake = Arc::new(FakeToolRunner::new());
        fake.on(
            &["account", "show"],
            FakeToolRunner::ok(
                r#"{"name": "Sub1", "id": "sub-id-1", "tenantId": "ten-1", "user": {"name": "user@x.com"}}"#,
            ),
        );
        fake.on(&["signed-in-user"], FakeToolRunner::ok("  \n"));

        let res = DiscoveryService::new(AzCli::new(fake), discard_logger()).discover();
        assert!(matches!(
            res,
            Err(DeployError::MalformedOutput {
                what: "object id",
                ..
            })
        ));
    }
}
