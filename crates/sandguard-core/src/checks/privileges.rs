//! Capability and `security_opt` checks.

use crate::document::{Document, ServiceDefinition};
use crate::normalize::as_text_list;
use crate::types::CheckId;

use super::ServiceCheck;

const NO_NEW_PRIVILEGES: &str = "no-new-privileges:true";

/// `cap_drop` must drop every capability. Names compare case-insensitively.
pub struct CapDropCheck;

impl ServiceCheck for CapDropCheck {
    fn id(&self) -> CheckId {
        CheckId::CapDropAll
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        let drops_all = as_text_list(service.cap_drop.as_ref())
            .iter()
            .any(|cap| cap.to_uppercase() == "ALL");

        if drops_all {
            Vec::new()
        } else {
            vec!["cap_drop must include ALL".to_string()]
        }
    }
}

/// `security_opt` must contain the exact entry `no-new-privileges:true`.
pub struct NoNewPrivilegesCheck;

impl ServiceCheck for NoNewPrivilegesCheck {
    fn id(&self) -> CheckId {
        CheckId::NoNewPrivileges
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        let present = as_text_list(service.security_opt.as_ref())
            .iter()
            .any(|opt| opt == NO_NEW_PRIVILEGES);

        if present {
            Vec::new()
        } else {
            vec![format!("missing {}", NO_NEW_PRIVILEGES)]
        }
    }
}

/// `security_opt` must name a profile for one LSM (`seccomp=...`, `apparmor=...`).
pub struct SecurityProfileCheck {
    id: CheckId,
    kind: &'static str,
}

impl SecurityProfileCheck {
    pub const SECCOMP: Self = Self {
        id: CheckId::SeccompProfile,
        kind: "seccomp",
    };

    pub const APPARMOR: Self = Self {
        id: CheckId::ApparmorProfile,
        kind: "apparmor",
    };
}

impl ServiceCheck for SecurityProfileCheck {
    fn id(&self) -> CheckId {
        self.id
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        let configured = as_text_list(service.security_opt.as_ref())
            .iter()
            .any(|opt| {
                opt.split_once('=')
                    .is_some_and(|(key, _)| key == self.kind)
            });

        if configured {
            Vec::new()
        } else {
            vec![format!("missing {} profile in security_opt", self.kind)]
        }
    }
}
