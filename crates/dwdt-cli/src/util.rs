use anyhow::Context;
use dwdt_core::types::{RecordSet, TypeId};
use dwdt_tables::{default_registry_config, Registry, RegistryConfig, TypeEntry};
use std::path::Path;

/// Build the registry from `--registry <file>` or fall back to the built-in
/// tables. Startup validation (overlap, stride, field spans) happens here,
/// before any command logic runs.
pub(crate) fn load_registry(path: Option<&str>) -> anyhow::Result<Registry> {
    let config = match path {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read registry file {path}"))?;
            RegistryConfig::from_json(&bytes)
                .with_context(|| format!("parse registry file {path}"))?
        }
        None => default_registry_config(),
    };
    config.into_registry().context("build registry")
}

/// Resolve a `--type` argument: a registry entry name, or an id written as
/// decimal or `0x`-prefixed hex.
pub(crate) fn resolve_type<'a>(
    registry: &'a Registry,
    spec: &str,
) -> anyhow::Result<&'a TypeEntry> {
    if let Some(id) = parse_type_id(spec) {
        return Ok(registry.lookup(id)?);
    }
    Ok(registry.lookup_name(spec)?)
}

fn parse_type_id(spec: &str) -> Option<TypeId> {
    let parsed = match spec.strip_prefix("0x").or_else(|| spec.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => spec.parse(),
    };
    parsed.ok().map(TypeId)
}

pub(crate) fn read_records(path: &str) -> anyhow::Result<RecordSet> {
    let bytes = std::fs::read(path).with_context(|| format!("read records file {path}"))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse records file {path}"))
}

pub(crate) fn write_records_pretty(path: &str, set: &RecordSet) -> anyhow::Result<()> {
    let mut text = serde_json::to_string_pretty(set).context("serialize records")?;
    text.push('\n');
    std::fs::write(Path::new(path), text).with_context(|| format!("write records file {path}"))
}
