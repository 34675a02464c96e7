//! Evaluator: runs the checklist over every service.
//!
//! Ordering is fixed: services in declaration order, checks in catalog
//! order within a service, document-level checks last.

use tracing::{debug, info};

use crate::checks::{check_top_level_secrets, service_checks, ServiceCheck};
use crate::document::Document;
use crate::types::Violation;

/// Runs every hardening check against a document.
pub struct Evaluator {
    checks: &'static [&'static dyn ServiceCheck],
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            checks: service_checks(),
        }
    }

    /// Evaluate a document, returning violations in report order.
    ///
    /// An empty result means every service passed every check.
    pub fn evaluate(&self, document: &Document) -> Vec<Violation> {
        let mut violations = Vec::new();

        for service in document.services() {
            debug!(service = %service.name, "evaluating service");

            for check in self.checks {
                for message in check.evaluate(&service.definition, document) {
                    debug!(service = %service.name, check = %check.id(), %message, "violation");
                    violations.push(Violation::service(check.id(), &service.name, message));
                }
            }
        }

        if let Some(violation) = check_top_level_secrets(document) {
            debug!(check = %violation.check, "document violation");
            violations.push(violation);
        }

        info!(
            services = document.services().len(),
            violations = violations.len(),
            "evaluation complete"
        );
        violations
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
