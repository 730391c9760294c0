use dwdt_core::error::Error;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A loaded cartridge image: a byte sequence of known total length,
/// addressed only by absolute offsets.
///
/// Opened images are memory-mapped and never written through; every
/// modification produces a fresh byte vector (see [`crate::insert`]).
#[derive(Debug)]
pub struct RomImage {
    path: Option<PathBuf>,
    bytes: ImageBytes,
}

#[derive(Debug)]
enum ImageBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl RomImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            path: Some(path),
            bytes: ImageBytes::Mapped(mmap),
        })
    }

    /// An in-memory image with no backing file; used by tests and by callers
    /// merging multiple insertions before writing anything out.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            path: None,
            bytes: ImageBytes::Owned(bytes),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.bytes {
            ImageBytes::Mapped(m) => m.as_ref(),
            ImageBytes::Owned(v) => v,
        }
    }

    pub fn len(&self) -> u64 {
        self.bytes().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}
