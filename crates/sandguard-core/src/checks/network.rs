//! Network isolation check.

use crate::document::{Document, NetworkDefinition, ServiceDefinition};
use crate::normalize::network_refs;
use crate::types::CheckId;

use super::ServiceCheck;

/// Every network a service joins must be declared `internal: true`.
///
/// An undeclared network counts as a plain bridge network and fails.
pub struct InternalNetworkCheck;

impl ServiceCheck for InternalNetworkCheck {
    fn id(&self) -> CheckId {
        CheckId::InternalNetwork
    }

    fn evaluate(&self, service: &ServiceDefinition, document: &Document) -> Vec<String> {
        let undeclared = NetworkDefinition::default();

        network_refs(service.networks.as_ref())
            .into_iter()
            .filter(|name| !document.network(name).unwrap_or(&undeclared).is_internal())
            .map(|name| format!("network '{}' must be internal", name))
            .collect()
    }
}
