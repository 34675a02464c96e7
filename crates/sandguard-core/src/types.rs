//! Core types for sandguard evaluation results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::Document;

/// Stable identifier for each hardening check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckId {
    #[serde(rename = "fs.read_only")]
    ReadOnly,
    #[serde(rename = "caps.drop_all")]
    CapDropAll,
    #[serde(rename = "security_opt.no_new_privileges")]
    NoNewPrivileges,
    #[serde(rename = "security_opt.seccomp")]
    SeccompProfile,
    #[serde(rename = "security_opt.apparmor")]
    ApparmorProfile,
    #[serde(rename = "fs.tmpfs")]
    Tmpfs,
    #[serde(rename = "resources.pids_limit")]
    PidsLimit,
    #[serde(rename = "resources.mem_limit")]
    MemLimit,
    #[serde(rename = "secrets.service")]
    ServiceSecrets,
    #[serde(rename = "secrets.inline_env")]
    InlineEnvSecret,
    #[serde(rename = "network.internal")]
    InternalNetwork,
    #[serde(rename = "secrets.top_level")]
    TopLevelSecrets,
}

impl CheckId {
    /// Every check, in evaluation order.
    pub const ALL: [CheckId; 12] = [
        CheckId::ReadOnly,
        CheckId::CapDropAll,
        CheckId::NoNewPrivileges,
        CheckId::SeccompProfile,
        CheckId::ApparmorProfile,
        CheckId::Tmpfs,
        CheckId::PidsLimit,
        CheckId::MemLimit,
        CheckId::ServiceSecrets,
        CheckId::InlineEnvSecret,
        CheckId::InternalNetwork,
        CheckId::TopLevelSecrets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::ReadOnly => "fs.read_only",
            CheckId::CapDropAll => "caps.drop_all",
            CheckId::NoNewPrivileges => "security_opt.no_new_privileges",
            CheckId::SeccompProfile => "security_opt.seccomp",
            CheckId::ApparmorProfile => "security_opt.apparmor",
            CheckId::Tmpfs => "fs.tmpfs",
            CheckId::PidsLimit => "resources.pids_limit",
            CheckId::MemLimit => "resources.mem_limit",
            CheckId::ServiceSecrets => "secrets.service",
            CheckId::InlineEnvSecret => "secrets.inline_env",
            CheckId::InternalNetwork => "network.internal",
            CheckId::TopLevelSecrets => "secrets.top_level",
        }
    }

    /// Whether the check runs once per service (as opposed to once per document).
    pub fn is_per_service(&self) -> bool {
        !matches!(self, CheckId::TopLevelSecrets)
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown check identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check id: {0}")]
pub struct UnknownCheckId(pub String);

impl FromStr for CheckId {
    type Err = UnknownCheckId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownCheckId(s.to_string()))
    }
}

/// A single failed hardening check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Which check failed
    pub check: CheckId,

    /// Offending service; `None` for document-level checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Human-readable description of the failure
    pub message: String,
}

impl Violation {
    /// A violation attributed to one service.
    pub fn service(check: CheckId, service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check,
            service: Some(service.into()),
            message: message.into(),
        }
    }

    /// A violation of a document-level requirement.
    pub fn document(check: CheckId, message: impl Into<String>) -> Self {
        Self {
            check,
            service: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service {
            Some(service) => write!(f, "{}: {}", service, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Result of checking one compose document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Where the document came from (usually a file path)
    pub source: String,

    /// True when no violations were found
    pub passed: bool,

    /// Number of services evaluated
    pub services_checked: usize,

    /// Violations in evaluation order
    pub violations: Vec<Violation>,

    /// When the evaluation happened
    pub evaluated_at: DateTime<Utc>,
}

impl Report {
    /// Evaluate `document` and wrap the outcome.
    pub fn build(source: impl Into<String>, document: &Document) -> Self {
        let violations = crate::evaluate(document);
        Self {
            source: source.into(),
            passed: violations.is_empty(),
            services_checked: document.services().len(),
            violations,
            evaluated_at: Utc::now(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_id_round_trips_through_str() {
        for id in CheckId::ALL {
            assert_eq!(id.as_str().parse::<CheckId>().unwrap(), id);
        }
        assert!("fs.nope".parse::<CheckId>().is_err());
    }

    #[test]
    fn test_check_id_serializes_as_dotted_name() {
        let json = serde_json::to_string(&CheckId::InlineEnvSecret).unwrap();
        assert_eq!(json, "\"secrets.inline_env\"");
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::service(CheckId::ReadOnly, "agent", "read_only must be true");
        assert_eq!(v.to_string(), "agent: read_only must be true");

        let v = Violation::document(
            CheckId::TopLevelSecrets,
            "top-level secrets definition is required",
        );
        assert_eq!(v.to_string(), "top-level secrets definition is required");
    }

    #[test]
    fn test_report_json_shape() {
        let doc = Document::from_yaml("services: {}\nsecrets: {token: {file: ./t}}\n").unwrap();
        let report = Report::build("compose.yml", &doc);
        assert!(report.passed);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["source"], "compose.yml");
        assert_eq!(json["services_checked"], 0);
        assert!(json["violations"].as_array().unwrap().is_empty());
        assert!(json["evaluated_at"].is_string());
    }
}
