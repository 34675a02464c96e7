//! Root filesystem and scratch-space checks.

use serde_yaml::Value;

use crate::document::{Document, ServiceDefinition};
use crate::normalize::as_text_list;
use crate::types::CheckId;

use super::ServiceCheck;

/// `read_only` must be the boolean `true`; truthy strings do not count.
pub struct ReadOnlyCheck;

impl ServiceCheck for ReadOnlyCheck {
    fn id(&self) -> CheckId {
        CheckId::ReadOnly
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        if matches!(service.read_only, Some(Value::Bool(true))) {
            Vec::new()
        } else {
            vec!["read_only must be true".to_string()]
        }
    }
}

/// A read-only root still needs writable scratch space. It must come from a
/// `/tmp` tmpfs that cannot host executables or setuid binaries.
pub struct TmpfsCheck;

impl ServiceCheck for TmpfsCheck {
    fn id(&self) -> CheckId {
        CheckId::Tmpfs
    }

    fn evaluate(&self, service: &ServiceDefinition, _document: &Document) -> Vec<String> {
        let mounts = as_text_list(service.tmpfs.as_ref());

        // Prefix match: "/tmp:rw,..." and "/tmpfiles" both qualify, first wins.
        match mounts.iter().find(|m| m.starts_with("/tmp")) {
            None => vec!["tmpfs must include /tmp".to_string()],
            Some(mount) if !(mount.contains("noexec") && mount.contains("nosuid")) => {
                vec!["/tmp tmpfs must include noexec,nosuid".to_string()]
            }
            Some(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::service_from_yaml;

    fn service(yaml: &str) -> ServiceDefinition {
        service_from_yaml(yaml)
    }

    fn run(check: &dyn ServiceCheck, yaml: &str) -> Vec<String> {
        check.evaluate(&service(yaml), &Document::default())
    }

    #[test]
    fn test_read_only_true_passes() {
        assert!(run(&ReadOnlyCheck, "read_only: true").is_empty());
    }

    #[test]
    fn test_read_only_must_be_boolean() {
        assert_eq!(run(&ReadOnlyCheck, "read_only: false").len(), 1);
        assert_eq!(run(&ReadOnlyCheck, "read_only: 'true'").len(), 1);
        assert_eq!(run(&ReadOnlyCheck, "read_only: 1").len(), 1);
        assert_eq!(run(&ReadOnlyCheck, "{}").len(), 1);
    }

    #[test]
    fn test_tmpfs_hardened() {
        assert!(run(&TmpfsCheck, "tmpfs: ['/tmp:rw,noexec,nosuid,size=64m']").is_empty());
        assert!(run(&TmpfsCheck, "tmpfs: '/tmp:nosuid,noexec'").is_empty());
    }

    #[test]
    fn test_tmpfs_missing() {
        assert_eq!(run(&TmpfsCheck, "{}"), vec!["tmpfs must include /tmp"]);
        assert_eq!(run(&TmpfsCheck, "tmpfs: ['/run:noexec,nosuid']"), vec!["tmpfs must include /tmp"]);
    }

    #[test]
    fn test_tmpfs_missing_flags() {
        assert_eq!(
            run(&TmpfsCheck, "tmpfs: ['/tmp:rw,exec']"),
            vec!["/tmp tmpfs must include noexec,nosuid"]
        );
        assert_eq!(
            run(&TmpfsCheck, "tmpfs: ['/tmp:noexec']"),
            vec!["/tmp tmpfs must include noexec,nosuid"]
        );
    }

    #[test]
    fn test_tmpfs_first_match_wins() {
        let yaml = "tmpfs: ['/tmp:rw', '/tmp:noexec,nosuid']";
        assert_eq!(run(&TmpfsCheck, yaml), vec!["/tmp tmpfs must include noexec,nosuid"]);
    }
}
