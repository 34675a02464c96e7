//! Resource limit checks.

use serde_yaml::Value;

use crate::document::{Document, ServiceDefinition};
use crate::normalize::is_set;
use crate::types::CheckId;

use super::ServiceCheck;

/// A limit field that must be present and non-zero.
pub struct ResourceLimitCheck {
    id: CheckId,
    field: &'static str,
    value: fn(&ServiceDefinition) -> Option<&Value>,
}

impl ResourceLimitCheck {
    pub const PIDS: Self = Self {
        id: CheckId::PidsLimit,
        field: "pids_limit",
        value: pids_limit,
    };

    pub const MEMORY: Self = Self {
        id: CheckId::MemLimit,
        field: "mem_limit",
        value: mem_limit,
    };
}

fn pids_limit(service: &ServiceDefinition) -> Option<&Value> {
    service.pids_limit.as_ref()
}

fn mem_limit(service: &ServiceDefinition) -> Option<&Value> {
    service.mem_limit.as_ref()
}

impl ServiceCheck for ResourceLimitCheck {
    fn id(&self) -> CheckId {
        self.id
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        if is_set((self.value)(service)) {
            Vec::new()
        } else {
            vec![format!("{} is required", self.field)]
        }
    }
}
