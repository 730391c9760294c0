use crate::registry::{Registry, TypeEntry};
use dwdt_core::error::Error;
use dwdt_core::types::{FieldRule, FieldSpec, FieldWidth, TypeId};
use serde::{Deserialize, Serialize};

/// The external, load-time registry table. The pipeline never hardcodes
/// image offsets; they all arrive through this structure (from a JSON file
/// or the built-in default set) and are validated by
/// [`Registry::from_entries`] before any stage runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub types: Vec<TypeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    pub type_id: u8,
    pub name: String,
    pub image_offset: u32,
    pub payload_size: u32,
    pub record_count: u32,
    pub record_stride: u32,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub offset: u32,
    pub width: WidthConfig,
    #[serde(flatten)]
    pub rule: RuleConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthConfig {
    U8,
    U16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    Range { min: u16, max: u16 },
    Enum { allowed: Vec<u16> },
}

impl RegistryConfig {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Convert into a validated [`Registry`]; every startup check
    /// (overlap, stride, field spans) runs here.
    pub fn into_registry(self) -> Result<Registry, Error> {
        let entries = self
            .types
            .into_iter()
            .map(TypeEntry::from)
            .collect::<Vec<_>>();
        Ok(Registry::from_entries(entries)?)
    }
}

impl From<TypeConfig> for TypeEntry {
    fn from(cfg: TypeConfig) -> Self {
        Self {
            type_id: TypeId(cfg.type_id),
            name: cfg.name,
            image_offset: cfg.image_offset,
            payload_size: cfg.payload_size,
            record_count: cfg.record_count,
            record_stride: cfg.record_stride,
            fields: cfg.fields.into_iter().map(FieldSpec::from).collect(),
        }
    }
}

impl From<FieldConfig> for FieldSpec {
    fn from(cfg: FieldConfig) -> Self {
        Self {
            name: cfg.name,
            offset: cfg.offset,
            width: match cfg.width {
                WidthConfig::U8 => FieldWidth::U8,
                WidthConfig::U16 => FieldWidth::U16,
            },
            rule: match cfg.rule {
                RuleConfig::Range { min, max } => FieldRule::Range { min, max },
                RuleConfig::Enum { allowed } => FieldRule::Enum(allowed),
            },
        }
    }
}
