//! Secret handling checks.
//!
//! Credentials belong in Docker secrets mounted as files. A service has to
//! reference at least one secret, the document has to declare them, and no
//! credential-shaped environment variable may carry its value inline.

use crate::document::{Document, ServiceDefinition};
use crate::normalize::{as_list, env_items, is_set, is_truthy};
use crate::types::{CheckId, Violation};

use super::patterns::{is_file_reference, is_secret_like};
use super::ServiceCheck;

/// The service must reference at least one secret.
pub struct ServiceSecretsCheck;

impl ServiceCheck for ServiceSecretsCheck {
    fn id(&self) -> CheckId {
        CheckId::ServiceSecrets
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        if as_list(service.secrets.as_ref()).is_empty() {
            vec!["at least one secret must be configured".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Environment variables named like credentials must be `*_FILE` pointers.
pub struct InlineEnvSecretCheck;

impl ServiceCheck for InlineEnvSecretCheck {
    fn id(&self) -> CheckId {
        CheckId::InlineEnvSecret
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        env_items(service.environment.as_ref())
            .into_iter()
            .filter(|(name, _)| !is_file_reference(name))
            .filter(|(name, value)| is_secret_like(name) && is_truthy(value))
            .map(|(name, _)| {
                format!(
                    "env '{}' looks like an inline secret; use *_FILE with Docker secrets",
                    name
                )
            })
            .collect()
    }
}

/// The document must declare a non-empty top-level `secrets` section.
pub fn check_top_level_secrets(document: &Document) -> Option<Violation> {
    if is_set(document.secrets()) {
        None
    } else {
        Some(Violation::document(
            CheckId::TopLevelSecrets,
            "top-level secrets definition is required",
        ))
    }
}
