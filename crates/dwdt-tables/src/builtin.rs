use crate::config::{FieldConfig, RegistryConfig, RuleConfig, TypeConfig, WidthConfig};

fn range(name: &str, offset: u32, width: WidthConfig, min: u16, max: u16) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        offset,
        width,
        rule: RuleConfig::Range { min, max },
    }
}

fn allowed(name: &str, offset: u32, width: WidthConfig, values: &[u16]) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        offset,
        width,
        rule: RuleConfig::Enum {
            allowed: values.to_vec(),
        },
    }
}

/// The default table set for the target cartridge. This is data, not logic:
/// `--registry <file>` replaces it wholesale, and nothing else in the
/// workspace states an image offset.
///
/// Declared fields cover the bytes whose meaning is established; everything
/// else in a record rides along as its opaque remainder.
pub fn default_registry_config() -> RegistryConfig {
    RegistryConfig {
        types: vec![
            TypeConfig {
                type_id: 0x01,
                name: "monsters".to_string(),
                image_offset: 0x5e5b,
                payload_size: 640,
                record_count: 40,
                record_stride: 16,
                fields: vec![
                    range("strength", 0, WidthConfig::U8, 0, 255),
                    range("agility", 1, WidthConfig::U8, 0, 255),
                    range("max_hp", 2, WidthConfig::U8, 0, 255),
                    allowed("attack_pattern", 3, WidthConfig::U8, &[0, 1, 2, 3]),
                    range("gold", 6, WidthConfig::U16, 0, 1023),
                    range("experience", 8, WidthConfig::U16, 0, 65535),
                ],
            },
            TypeConfig {
                type_id: 0x02,
                name: "spells".to_string(),
                image_offset: 0x1d63,
                payload_size: 80,
                record_count: 10,
                record_stride: 8,
                fields: vec![
                    range("mp_cost", 0, WidthConfig::U8, 0, 255),
                    allowed("effect", 1, WidthConfig::U8, &[0, 1, 2, 3, 4]),
                    range("power", 2, WidthConfig::U8, 0, 255),
                ],
            },
            TypeConfig {
                type_id: 0x03,
                name: "items".to_string(),
                image_offset: 0x0c40,
                payload_size: 96,
                record_count: 24,
                record_stride: 4,
                fields: vec![
                    range("price", 0, WidthConfig::U16, 0, 65000),
                    allowed("kind", 2, WidthConfig::U8, &[0, 1, 2, 3, 4, 5]),
                ],
            },
        ],
    }
}
