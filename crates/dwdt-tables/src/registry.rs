use dwdt_core::error::RegistryError;
use dwdt_core::types::{FieldRule, FieldSpec, TypeId};

/// Static association of one type id with its image location and structural
/// layout. Entries never change after the registry is built.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub type_id: TypeId,
    pub name: String,
    pub image_offset: u32,
    pub payload_size: u32,
    pub record_count: u32,
    pub record_stride: u32,
    pub fields: Vec<FieldSpec>,
}

impl TypeEntry {
    /// Bytes of one record claimed by declared fields.
    pub fn claimed_bytes(&self) -> u32 {
        self.fields.iter().map(|f| f.width.size_bytes()).sum()
    }

    /// Length of the opaque remainder each record carries.
    pub fn remainder_len(&self) -> u32 {
        self.record_stride - self.claimed_bytes()
    }
}

/// The load-time table mapping type ids to image regions and codecs.
///
/// Construction performs every startup check; a registry that exists is safe
/// to share read-only across threads for the rest of the run.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<TypeEntry>,
}

impl Registry {
    pub fn from_entries(entries: Vec<TypeEntry>) -> Result<Self, RegistryError> {
        for entry in &entries {
            validate_entry(entry)?;
        }

        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.type_id == b.type_id {
                    return Err(RegistryError::DuplicateTypeId(a.type_id));
                }
                let a_end = a.image_offset as u64 + a.payload_size as u64;
                let b_end = b.image_offset as u64 + b.payload_size as u64;
                if (a.image_offset as u64) < b_end && (b.image_offset as u64) < a_end {
                    return Err(RegistryError::ConfigOverlap {
                        first: a.name.clone(),
                        second: b.name.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, type_id: TypeId) -> Result<&TypeEntry, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.type_id == type_id)
            .ok_or(RegistryError::UnknownType(type_id))
    }

    pub fn lookup_name(&self, name: &str) -> Result<&TypeEntry, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| RegistryError::UnknownTypeName(name.to_string()))
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }
}

fn validate_entry(entry: &TypeEntry) -> Result<(), RegistryError> {
    let stride = entry.record_stride;
    if stride == 0
        || entry
            .record_count
            .checked_mul(stride)
            .map(|total| total != entry.payload_size)
            .unwrap_or(true)
    {
        return Err(RegistryError::StrideMismatch {
            name: entry.name.clone(),
            payload_size: entry.payload_size,
            record_count: entry.record_count,
            record_stride: stride,
        });
    }

    for (i, field) in entry.fields.iter().enumerate() {
        let end = field.offset as u64 + field.width.size_bytes() as u64;
        if end > stride as u64 {
            return Err(RegistryError::FieldSpanOutOfStride {
                type_name: entry.name.clone(),
                field: field.name.clone(),
                stride,
            });
        }
        if let FieldRule::Enum(allowed) = &field.rule {
            if allowed.is_empty() {
                return Err(RegistryError::EmptyEnumRule {
                    type_name: entry.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        for other in &entry.fields[i + 1..] {
            let other_end = other.offset as u64 + other.width.size_bytes() as u64;
            if (field.offset as u64) < other_end && (other.offset as u64) < end {
                return Err(RegistryError::FieldOverlap {
                    type_name: entry.name.clone(),
                    first: field.name.clone(),
                    second: other.name.clone(),
                });
            }
        }
    }

    Ok(())
}
