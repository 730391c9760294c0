#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(pub u8);

impl TypeId {
    /// Identifies one registered data type (one table region in the image).
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    /// On-disk storage width of a declared field.
    U8,
    U16,
}

impl FieldWidth {
    pub fn size_bytes(self) -> u32 {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }

    /// Largest value the storage width can hold.
    pub fn max_value(self) -> u16 {
        match self {
            Self::U8 => u8::MAX as u16,
            Self::U16 => u16::MAX,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Declared value constraint for a field: an inclusive range or a closed
    /// set of allowed values.
    Range { min: u16, max: u16 },
    Enum(Vec<u16>),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// One declared field within a record: where it lives in the record's
    /// stride slice, how wide it is, and what values it may take.
    pub name: String,
    pub offset: u32,
    pub width: FieldWidth,
    pub rule: FieldRule,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub name: String,
    pub value: u16,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// One fixed-stride element of a payload: the declared field values plus
    /// every byte the decoder did not claim, in ascending position order.
    ///
    /// The remainder is carried through unpack/pack verbatim; it is what makes
    /// `encode(decode(payload)) == payload` hold without every byte of the
    /// record having a known meaning.
    pub fields: Vec<FieldValue>,
    pub remainder: Vec<u8>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<u16> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    pub fn set_field(&mut self, name: &str, value: u16) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(f) => {
                f.value = value;
                true
            }
            None => false,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    /// The decoded, editable form of one type's payload.
    pub type_id: TypeId,
    pub records: Vec<Record>,
}
