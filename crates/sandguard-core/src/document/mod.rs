//! Compose document loading.
//!
//! A compose file is loosely typed: most hardening fields accept either a
//! single value or a list. This module keeps each field as a raw YAML value
//! and leaves shape coercion to [`crate::normalize`].

mod parser;

pub use parser::{Document, DocumentError, NetworkDefinition, Service, ServiceDefinition};
