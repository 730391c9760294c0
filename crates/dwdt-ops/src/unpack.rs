use dwdt_core::error::{Error, PipelineError};
use dwdt_core::types::RecordSet;
use dwdt_format::Container;
use dwdt_tables::{decode_records, TypeEntry};
use tracing::debug;

/// Parse a container's payload into structured records. The container is
/// checked against the entry it claims to belong to before any decoding.
pub fn unpack(container: &Container, entry: &TypeEntry) -> Result<RecordSet, Error> {
    if container.type_id() != entry.type_id {
        return Err(PipelineError::TypeMismatch {
            container: container.type_id(),
            entry: entry.type_id,
        }
        .into());
    }
    if container.payload_size() != entry.payload_size {
        return Err(PipelineError::SizeMismatch {
            expected: entry.payload_size,
            actual: container.payload_size(),
        }
        .into());
    }

    let set = decode_records(entry, container.payload())?;
    debug!(
        type_id = %entry.type_id,
        records = set.records.len(),
        "unpacked container"
    );
    Ok(set)
}
