//! Compose document parsing from YAML/JSON.

use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::normalize;

/// Errors that can occur when loading a compose document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read compose file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Compose document is empty")]
    Empty,

    #[error("Compose document root must be a mapping")]
    NotAMapping,

    #[error("Top-level '{0}' must be a mapping")]
    InvalidSection(&'static str),

    #[error("Service '{0}' must be a mapping")]
    InvalidService(String),
}

/// The hardening-relevant fields of a single service.
///
/// Fields stay as raw values: compose accepts both `cap_drop: ALL` and
/// `cap_drop: [ALL]`, and truthiness matters more than type for the
/// resource limits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDefinition {
    pub read_only: Option<Value>,
    pub cap_drop: Option<Value>,
    pub security_opt: Option<Value>,
    pub tmpfs: Option<Value>,
    pub pids_limit: Option<Value>,
    pub mem_limit: Option<Value>,
    pub secrets: Option<Value>,
    pub environment: Option<Value>,
    pub networks: Option<Value>,
}

impl ServiceDefinition {
    /// Pick the known fields out of a service body.
    ///
    /// Lookup is by key, so unrelated keys of any type (including
    /// non-string ones) are ignored. An explicit `null` counts as absent.
    pub fn from_mapping(body: &Mapping) -> Self {
        Self {
            read_only: field(body, "read_only"),
            cap_drop: field(body, "cap_drop"),
            security_opt: field(body, "security_opt"),
            tmpfs: field(body, "tmpfs"),
            pids_limit: field(body, "pids_limit"),
            mem_limit: field(body, "mem_limit"),
            secrets: field(body, "secrets"),
            environment: field(body, "environment"),
            networks: field(body, "networks"),
        }
    }
}

/// A top-level network declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkDefinition {
    pub internal: Option<Value>,
}

impl NetworkDefinition {
    pub fn from_mapping(body: &Mapping) -> Self {
        Self {
            internal: field(body, "internal"),
        }
    }

    /// True only for a literal boolean `internal: true`.
    pub fn is_internal(&self) -> bool {
        matches!(self.internal, Some(Value::Bool(true)))
    }
}

/// A named service, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub name: String,
    pub definition: ServiceDefinition,
}

/// A parsed compose document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    services: Vec<Service>,
    networks: HashMap<String, NetworkDefinition>,
    secrets: Option<Value>,
}

impl Document {
    /// Parse a document from a YAML (or JSON) string.
    ///
    /// `<<` merge keys are resolved before the document is interpreted, so
    /// services built from shared `x-` anchors are checked as written.
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        let mut value: Value = serde_yaml::from_str(yaml)?;
        value.apply_merge()?;
        Self::from_value(value)
    }

    /// Parse a document from a file on disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Build a document from an already-parsed value.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let root = match value {
            Value::Null => return Err(DocumentError::Empty),
            Value::Mapping(root) => root,
            _ => return Err(DocumentError::NotAMapping),
        };

        let services = match section(&root, "services")? {
            Some(entries) => entries
                .iter()
                .map(|(name, body)| Service::from_entry(name, body))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let mut networks = HashMap::new();
        if let Some(entries) = section(&root, "networks")? {
            for (name, body) in entries {
                let definition = match body {
                    Value::Mapping(body) => NetworkDefinition::from_mapping(body),
                    _ => NetworkDefinition::default(),
                };
                networks.insert(normalize::text(name), definition);
            }
        }

        Ok(Self {
            services,
            networks,
            secrets: root.get("secrets").cloned(),
        })
    }

    /// Services in declaration order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Look up a top-level network declaration.
    pub fn network(&self, name: &str) -> Option<&NetworkDefinition> {
        self.networks.get(name)
    }

    /// The raw top-level `secrets` section, if declared.
    pub fn secrets(&self) -> Option<&Value> {
        self.secrets.as_ref()
    }
}

impl Service {
    fn from_entry(name: &Value, body: &Value) -> Result<Self, DocumentError> {
        let name = normalize::text(name);
        let definition = match body {
            Value::Null => ServiceDefinition::default(),
            Value::Mapping(body) => ServiceDefinition::from_mapping(body),
            _ => return Err(DocumentError::InvalidService(name)),
        };
        Ok(Self { name, definition })
    }
}

fn field(body: &Mapping, key: &str) -> Option<Value> {
    body.get(key).filter(|v| !v.is_null()).cloned()
}

/// Fetch a top-level section that must be a mapping when present.
fn section<'a>(
    root: &'a Mapping,
    key: &'static str,
) -> Result<Option<&'a Mapping>, DocumentError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(entries)) => Ok(Some(entries)),
        Some(_) => Err(DocumentError::InvalidSection(key)),
    }
}
