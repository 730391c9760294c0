use crate::image::RomImage;
use dwdt_core::error::{Error, PipelineError};
use dwdt_format::Container;
use dwdt_tables::TypeEntry;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Write a container's payload into a copy of the image at its registered
/// offset. Every gate below must pass before any output bytes exist; the
/// original image is never mutated, so a failed insert leaves nothing to
/// clean up.
///
/// Gates, in order:
/// 1. provenance: the container's source offset must equal the entry's
///    registered offset;
/// 2. the serialized container must re-parse cleanly (checksum verified even
///    for containers built in-process this run);
/// 3. the payload length must equal the registered payload size, rejected
///    before any bytes are produced;
/// 4. the target region must lie inside the image;
/// 5. the new image's length must equal the original's.
pub fn insert(
    image: &RomImage,
    container: &Container,
    entry: &TypeEntry,
) -> Result<Vec<u8>, Error> {
    if container.source_offset() != entry.image_offset {
        return Err(PipelineError::ProvenanceMismatch {
            container: container.source_offset(),
            entry: entry.image_offset,
        }
        .into());
    }

    // Insertion never trusts a container it did not just validate.
    let verified = Container::parse(&container.serialize())?;

    if verified.payload_size() != entry.payload_size {
        return Err(PipelineError::SizeMismatch {
            expected: entry.payload_size,
            actual: verified.payload_size(),
        }
        .into());
    }

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

    let mut out = image.bytes().to_vec();
    out[start..end].copy_from_slice(verified.payload());

    if out.len() as u64 != image.len() {
        return Err(PipelineError::SizeInvariantViolated {
            original: image.len(),
            modified: out.len() as u64,
        }
        .into());
    }

    debug!(
        type_id = %entry.type_id,
        offset = entry.image_offset,
        bytes = entry.payload_size,
        "inserted payload"
    );
    Ok(out)
}

/// File-level insert: back up the original image (timestamp-tagged), compute
/// the new image, and write it atomically to `out_path`. A crash at any point
/// leaves either the untouched original or a complete new image, never a
/// half-written one.
///
/// Returns the backup path.
pub fn insert_into_image_file(
    image_path: &Path,
    container: &Container,
    entry: &TypeEntry,
    out_path: &Path,
) -> Result<PathBuf, Error> {
    let image = RomImage::open(image_path)?;

    // All gates run before any file is touched.
    let new_image = insert(&image, container, entry)?;

    let backup_path = backup_path_for(image_path, now_unix_secs());
    std::fs::copy(image_path, &backup_path)?;
    dwdt_format::atomic_write_bytes(out_path, &new_image)?;

    info!(
        image = %image_path.display(),
        out = %out_path.display(),
        backup = %backup_path.display(),
        "image updated"
    );
    Ok(backup_path)
}

fn backup_path_for(image_path: &Path, timestamp: u32) -> PathBuf {
    let name = image_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    image_path.with_file_name(format!("{name}.bak.{timestamp}"))
}

fn now_unix_secs() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}
