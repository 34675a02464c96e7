//! # sandguard-core
//!
//! Deterministic sandbox-hardening checks for compose files.
//!
//! This crate inspects the services declared in a compose document and
//! reports every place where one falls short of the hardening checklist:
//! read-only root, dropped capabilities, seccomp/apparmor profiles, a
//! locked-down `/tmp`, resource limits, file-mounted secrets and internal
//! networks.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same document always produces the same violations, in the same order
//! 2. **Read-only**: The document is never modified
//! 3. **Exhaustive**: Every check runs for every service; one failure never hides another
//! 4. **Re-entrant**: No global mutable state; evaluate documents from any thread
//!
//! ## Example
//!
//! ```rust,ignore
//! use sandguard_core::{evaluate, Document};
//!
//! let document = Document::from_yaml_file("docker-compose.yml")?;
//! for violation in evaluate(&document) {
//!     println!("FAIL: {}", violation);
//! }
//! ```

pub mod catalog;
pub mod checks;
pub mod document;
pub mod evaluator;
pub mod normalize;
pub mod types;

// Re-export main types at crate root
pub use catalog::{catalog, describe, CheckInfo};
pub use checks::ServiceCheck;
pub use document::{Document, DocumentError, NetworkDefinition, Service, ServiceDefinition};
pub use evaluator::Evaluator;
pub use types::{CheckId, Report, UnknownCheckId, Violation};

/// Evaluate a compose document against the hardening checklist.
///
/// This is the main entry point for sandguard evaluation. An empty result
/// means the document is fully compliant.
pub fn evaluate(document: &Document) -> Vec<Violation> {
    Evaluator::new().evaluate(document)
}

/// Like [`evaluate`], rendering each violation as `"<service>: <message>"`.
pub fn violation_messages(document: &Document) -> Vec<String> {
    evaluate(document).iter().map(ToString::to_string).collect()
}
