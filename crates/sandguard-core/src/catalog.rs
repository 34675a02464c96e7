//! Human-facing descriptions of every check.

use crate::types::CheckId;

/// Requirement and remediation text for one check.
#[derive(Debug, Clone, Copy)]
pub struct CheckInfo {
    pub id: CheckId,
    pub requirement: &'static str,
    pub remediation: &'static str,
}

static CATALOG: [CheckInfo; 12] = [
    CheckInfo {
        id: CheckId::ReadOnly,
        requirement: "Service root filesystem is mounted read-only.",
        remediation: "Set `read_only: true` and give writable paths their own tmpfs or volume.",
    },
    CheckInfo {
        id: CheckId::CapDropAll,
        requirement: "All Linux capabilities are dropped.",
        remediation: "Set `cap_drop: [ALL]` and add back only what the service needs with `cap_add`.",
    },
    CheckInfo {
        id: CheckId::NoNewPrivileges,
        requirement: "Processes cannot gain privileges through setuid binaries.",
        remediation: "Add `no-new-privileges:true` to `security_opt`.",
    },
    CheckInfo {
        id: CheckId::SeccompProfile,
        requirement: "A seccomp profile restricts the syscalls available to the service.",
        remediation: "Add `seccomp=<path-to-profile.json>` to `security_opt`.",
    },
    CheckInfo {
        id: CheckId::ApparmorProfile,
        requirement: "An AppArmor profile confines the service.",
        remediation: "Add `apparmor=<profile-name>` to `security_opt`.",
    },
    CheckInfo {
        id: CheckId::Tmpfs,
        requirement: "/tmp is a tmpfs mount with noexec and nosuid.",
        remediation: "Add `/tmp:rw,noexec,nosuid,size=64m` to `tmpfs`.",
    },
    CheckInfo {
        id: CheckId::PidsLimit,
        requirement: "The number of processes is bounded.",
        remediation: "Set `pids_limit` to a positive value such as 128.",
    },
    CheckInfo {
        id: CheckId::MemLimit,
        requirement: "Memory usage is bounded.",
        remediation: "Set `mem_limit`, for example `mem_limit: 512m`.",
    },
    CheckInfo {
        id: CheckId::ServiceSecrets,
        requirement: "The service receives credentials through Docker secrets.",
        remediation: "List the secrets the service needs under its `secrets` key.",
    },
    CheckInfo {
        id: CheckId::InlineEnvSecret,
        requirement: "No credential is passed inline through the environment.",
        remediation: "Mount the value as a secret and point a `<NAME>_FILE` variable at /run/secrets/<name>.",
    },
    CheckInfo {
        id: CheckId::InternalNetwork,
        requirement: "The service only joins networks without external routing.",
        remediation: "Declare every network the service uses with `internal: true`.",
    },
    CheckInfo {
        id: CheckId::TopLevelSecrets,
        requirement: "The document declares its secrets at the top level.",
        remediation: "Add a top-level `secrets` section with a `file` or `external` source per secret.",
    },
];

/// All checks, in evaluation order.
pub fn catalog() -> &'static [CheckInfo] {
    &CATALOG
}

/// Look up the description of one check.
pub fn describe(id: CheckId) -> &'static CheckInfo {
    // CATALOG is ordered like CheckId::ALL.
    let index = CheckId::ALL
        .iter()
        .position(|candidate| *candidate == id)
        .unwrap_or_default();
    &CATALOG[index]
}
