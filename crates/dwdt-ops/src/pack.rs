use dwdt_core::error::Error;
use dwdt_format::Container;
use dwdt_tables::{encode_records, TypeEntry, ValidatedRecords};
use tracing::debug;

/// Serialize a validated record set back into a fresh container destined for
/// its registered image offset.
///
/// Taking [`ValidatedRecords`] makes "validated before pack" a type-level
/// precondition; there is no unvalidated path into this function.
pub fn pack(validated: ValidatedRecords<'_>, entry: &TypeEntry) -> Result<Container, Error> {
    let payload = encode_records(&validated, entry);
    debug!(
        type_id = %entry.type_id,
        bytes = payload.len(),
        "packed records"
    );
    Ok(Container::build(entry.type_id, entry.image_offset, payload)?)
}

/// [`pack`] with a pinned container timestamp, for reproducible outputs.
pub fn pack_at(
    validated: ValidatedRecords<'_>,
    entry: &TypeEntry,
    timestamp: u32,
) -> Result<Container, Error> {
    let payload = encode_records(&validated, entry);
    Ok(Container::build_at(
        entry.type_id,
        entry.image_offset,
        payload,
        timestamp,
    )?)
}
