//! The type registry and per-type structural (de)serializers.
//!
//! A [`Registry`] is built once from configuration, validated at startup
//! (offset overlap, stride arithmetic, field spans), and read-only
//! thereafter. Record payloads decode into field values plus an opaque
//! remainder so unedited payloads re-encode byte-for-byte.

mod builtin;
mod config;
mod records;
mod registry;
mod validate;

pub use builtin::default_registry_config;
pub use config::{FieldConfig, RegistryConfig, RuleConfig, TypeConfig, WidthConfig};
pub use records::{decode_records, encode_records};
pub use registry::{Registry, TypeEntry};
pub use validate::{validate, validate_all, ValidatedRecords};
