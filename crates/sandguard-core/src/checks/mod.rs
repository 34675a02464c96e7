//! The sandbox-hardening checklist.
//!
//! Each check answers one question about a single service and reports zero
//! or more failure messages. Checks never see each other's results, so one
//! failure never hides another.
//!
//! | Check | Requirement |
//! |-------|-------------|
//! | `fs.read_only` | root filesystem mounted read-only |
//! | `caps.drop_all` | all Linux capabilities dropped |
//! | `security_opt.*` | no-new-privileges, seccomp and apparmor profiles |
//! | `fs.tmpfs` | `/tmp` is a noexec,nosuid tmpfs |
//! | `resources.*` | pids and memory limits set |
//! | `secrets.*` | secrets mounted as files, never inlined |
//! | `network.internal` | only internal networks attached |

mod filesystem;
mod network;
pub mod patterns;
mod privileges;
mod resources;
mod secrets;

pub use filesystem::{ReadOnlyCheck, TmpfsCheck};
pub use network::InternalNetworkCheck;
pub use privileges::{CapDropCheck, NoNewPrivilegesCheck, SecurityProfileCheck};
pub use resources::ResourceLimitCheck;
pub use secrets::{check_top_level_secrets, InlineEnvSecretCheck, ServiceSecretsCheck};

use crate::document::{Document, ServiceDefinition};
use crate::types::CheckId;

/// Trait implemented by every per-service check.
pub trait ServiceCheck: Send + Sync {
    /// Stable identifier of this check.
    fn id(&self) -> CheckId;

    /// Evaluate one service, returning a message for each failure.
    ///
    /// The document is available for cross-references such as network
    /// declarations; checks must not assume anything else about it.
    fn evaluate(&self, service: &ServiceDefinition, document: &Document) -> Vec<String>;
}

static SERVICE_CHECKS: [&dyn ServiceCheck; 11] = [
    &ReadOnlyCheck,
    &CapDropCheck,
    &NoNewPrivilegesCheck,
    &SecurityProfileCheck::SECCOMP,
    &SecurityProfileCheck::APPARMOR,
    &TmpfsCheck,
    &ResourceLimitCheck::PIDS,
    &ResourceLimitCheck::MEMORY,
    &ServiceSecretsCheck,
    &InlineEnvSecretCheck,
    &InternalNetworkCheck,
];

/// Per-service checks in the order their violations are reported.
pub fn service_checks() -> &'static [&'static dyn ServiceCheck] {
    &SERVICE_CHECKS
}

/// Build a service from a YAML body, the way the loader does.
#[cfg(test)]
pub(crate) fn service_from_yaml(yaml: &str) -> ServiceDefinition {
    let body: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    ServiceDefinition::from_mapping(body.as_mapping().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_catalog_order() {
        let ids: Vec<CheckId> = service_checks().iter().map(|c| c.id()).collect();
        let expected: Vec<CheckId> = CheckId::ALL
            .into_iter()
            .filter(CheckId::is_per_service)
            .collect();
        assert_eq!(ids, expected);
    }
}
