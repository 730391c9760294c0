use crate::types::TypeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("truncated input at byte {at}, need {needed} bytes")]
    Truncated { at: u64, needed: usize },

    #[error("bad magic: expected 0x54445744, got 0x{0:08x}")]
    BadMagic(u32),

    #[error("unsupported version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("checksum mismatch: stored 0x{stored:08x}, computed 0x{computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("payload of {size} bytes exceeds maximum of {max}")]
    SizeExceeded { size: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown type {0}")]
    UnknownType(TypeId),

    #[error("unknown type name {0:?}")]
    UnknownTypeName(String),

    #[error("offset ranges of {first:?} and {second:?} overlap")]
    ConfigOverlap { first: String, second: String },

    #[error(
        "{name:?}: payload_size {payload_size} != record_count {record_count} * record_stride {record_stride}"
    )]
    StrideMismatch {
        name: String,
        payload_size: u32,
        record_count: u32,
        record_stride: u32,
    },

    #[error("duplicate type id {0}")]
    DuplicateTypeId(TypeId),

    #[error("{type_name:?}: field {field:?} extends past record stride {stride}")]
    FieldSpanOutOfStride {
        type_name: String,
        field: String,
        stride: u32,
    },

    #[error("{type_name:?}: fields {first:?} and {second:?} claim the same byte")]
    FieldOverlap {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("{type_name:?}: field {field:?} has an empty enum rule")]
    EmptyEnumRule { type_name: String, field: String },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("container type {container} does not match entry type {entry}")]
    TypeMismatch { container: TypeId, entry: TypeId },

    #[error("payload size {actual} does not match registered size {expected}")]
    SizeMismatch { expected: u32, actual: u32 },

    #[error("region [{offset}, {offset}+{len}) exceeds image length {image_len}")]
    OutOfBounds {
        offset: u32,
        len: u32,
        image_len: u64,
    },

    #[error("container source offset 0x{container:x} does not match registered offset 0x{entry:x}")]
    ProvenanceMismatch { container: u32, entry: u32 },

    #[error("image length changed: {original} bytes before insert, {modified} after")]
    SizeInvariantViolated { original: u64, modified: u64 },
}

#[derive(Debug, Error)]
#[error("record {record}, field {field:?}: value {value} rejected ({reason})")]
pub struct ValidationError {
    pub record: usize,
    pub field: String,
    pub value: u16,
    pub reason: String,
}
