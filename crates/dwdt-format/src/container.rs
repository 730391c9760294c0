use dwdt_core::error::ContainerError;
use dwdt_core::types::TypeId;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MAGIC_DWDT: u32 = 0x5444_5744; // 'D' 'W' 'D' 'T'

/// Fixed header size; the payload follows immediately after.
pub const HEADER_LEN: usize = 32;

pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;

/// Largest payload a container will wrap. Table regions in cartridge images
/// are far smaller; this bound exists so a corrupt size field cannot drive a
/// huge allocation.
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// The versioned, checksummed wrapper around one extracted payload.
///
/// Containers are immutable once built: edits produce a new container via
/// [`Container::build`], never mutation in place. The stored checksum always
/// equals the CRC-32 recomputed over the payload bytes; [`Container::parse`]
/// enforces this before any payload is handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    version_major: u8,
    version_minor: u8,
    type_id: TypeId,
    source_offset: u32,
    checksum: u32,
    timestamp: u32,
    payload: Vec<u8>,
}

impl Container {
    /// Wrap `payload` in a fresh container stamped with the current format
    /// version and wall-clock time.
    pub fn build(
        type_id: TypeId,
        source_offset: u32,
        payload: Vec<u8>,
    ) -> Result<Self, ContainerError> {
        Self::build_at(type_id, source_offset, payload, now_unix_secs())
    }

    /// Like [`Container::build`] with a pinned timestamp, so serialized bytes
    /// are reproducible.
    pub fn build_at(
        type_id: TypeId,
        source_offset: u32,
        payload: Vec<u8>,
        timestamp: u32,
    ) -> Result<Self, ContainerError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ContainerError::SizeExceeded {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        let checksum = crc32(&payload);
        Ok(Self {
            version_major: VERSION_MAJOR,
            version_minor: VERSION_MINOR,
            type_id,
            source_offset,
            checksum,
            timestamp,
            payload,
        })
    }

    /// Parse a serialized container. Gate order: magic, major version, header
    /// and payload bounds, checksum. A failed parse yields no payload.
    pub fn parse(bytes: &[u8]) -> Result<Self, ContainerError> {
        let magic = read_u32(bytes, 0)?;
        if magic != MAGIC_DWDT {
            return Err(ContainerError::BadMagic(magic));
        }
        let version_major = read_u8(bytes, 4)?;
        let version_minor = read_u8(bytes, 5)?;
        if version_major != VERSION_MAJOR {
            return Err(ContainerError::UnsupportedVersion {
                major: version_major,
                minor: version_minor,
            });
        }
        let type_id = TypeId(read_u8(bytes, 6)?);
        // Byte 7 and bytes 0x18..0x20 are reserved: ignored on read so minor
        // revisions can assign them without breaking older parsers.
        let payload_size = read_u32(bytes, 8)? as usize;
        let source_offset = read_u32(bytes, 12)?;
        let checksum = read_u32(bytes, 16)?;
        let timestamp = read_u32(bytes, 20)?;

        if payload_size > MAX_PAYLOAD_SIZE {
            return Err(ContainerError::SizeExceeded {
                size: payload_size,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        if bytes.len() < HEADER_LEN + payload_size {
            return Err(ContainerError::Truncated {
                at: HEADER_LEN as u64,
                needed: payload_size,
            });
        }
        let payload = bytes[HEADER_LEN..HEADER_LEN + payload_size].to_vec();

        let computed = crc32(&payload);
        if computed != checksum {
            return Err(ContainerError::ChecksumMismatch {
                stored: checksum,
                computed,
            });
        }

        Ok(Self {
            version_major,
            version_minor,
            type_id,
            source_offset,
            checksum,
            timestamp,
            payload,
        })
    }

    /// Header followed by payload, deterministic byte-for-byte. Only the
    /// timestamp varies between otherwise-identical containers; pin it via
    /// [`Container::build_at`] when reproducibility matters.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN + self.payload.len()];
        put_u32(&mut buf, 0, MAGIC_DWDT);
        buf[4] = self.version_major;
        buf[5] = self.version_minor;
        buf[6] = self.type_id.get();
        buf[7] = 0;
        put_u32(&mut buf, 8, self.payload.len() as u32);
        put_u32(&mut buf, 12, self.source_offset);
        put_u32(&mut buf, 16, self.checksum);
        put_u32(&mut buf, 20, self.timestamp);
        // bytes 24..32 stay zero (reserved)
        buf[HEADER_LEN..].copy_from_slice(&self.payload);
        buf
    }

    pub fn version_major(&self) -> u8 {
        self.version_major
    }

    pub fn version_minor(&self) -> u8 {
        self.version_minor
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn payload_size(&self) -> u32 {
        self.payload.len() as u32
    }

    pub fn source_offset(&self) -> u32 {
        self.source_offset
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

fn now_unix_secs() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

fn read_exact<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], ContainerError> {
    let end = offset
        .checked_add(N)
        .ok_or(ContainerError::Truncated {
            at: offset as u64,
            needed: N,
        })?;
    if end > bytes.len() {
        return Err(ContainerError::Truncated {
            at: offset as u64,
            needed: N,
        });
    }
    Ok(bytes[offset..end].try_into().unwrap())
}

fn read_u8(bytes: &[u8], offset: usize) -> Result<u8, ContainerError> {
    Ok(read_exact::<1>(bytes, offset)?[0])
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, ContainerError> {
    Ok(u32::from_le_bytes(read_exact::<4>(bytes, offset)?))
}

fn put_u32(buf: &mut [u8], offset: usize, v: u32) {
    buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
}
