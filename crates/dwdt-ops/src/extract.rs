use crate::image::RomImage;
use dwdt_core::error::{Error, PipelineError};
use dwdt_core::types::TypeId;
use dwdt_format::Container;
use dwdt_tables::Registry;
use tracing::debug;

/// Read one type's payload out of the image at its registered location and
/// wrap it in a fresh container. Purely a read; the image is untouched.
pub fn extract(
    image: &RomImage,
    registry: &Registry,
    type_id: TypeId,
) -> Result<Container, Error> {
    let entry = registry.lookup(type_id)?;

    let start = entry.image_offset as usize;
    let end = start + entry.payload_size as usize;
    if end as u64 > image.len() {
        return Err(PipelineError::OutOfBounds {
            offset: entry.image_offset,
            len: entry.payload_size,
            image_len: image.len(),
        }
        .into());
    }

    let payload = image.bytes()[start..end].to_vec();
    debug!(
        type_id = %type_id,
        offset = entry.image_offset,
        bytes = entry.payload_size,
        "extracted payload"
    );
    Ok(Container::build(type_id, entry.image_offset, payload)?)
}
