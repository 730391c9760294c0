use crate::Container;
use dwdt_core::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Read and fully re-verify a container file. Any framing or checksum
/// problem surfaces here; a returned container is safe to unpack.
pub fn read_container(path: impl AsRef<Path>) -> Result<Container, Error> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(Container::parse(&bytes)?)
}

/// Serialize `container` and write it atomically (temp file, sync, rename),
/// so an interrupted write never leaves a half-written container behind.
pub fn write_container_atomic(path: impl AsRef<Path>, container: &Container) -> Result<(), Error> {
    atomic_write(path.as_ref(), &container.serialize())
}

pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("container.dwdt");

    let mut i = 0u32;
    loop {
        let tmp_name = if i == 0 {
            format!("{base}.tmp")
        } else {
            format!("{base}.tmp.{i}")
        };
        let tmp_path = dir.join(tmp_name);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(mut f) => {
                f.write_all(bytes)?;
                f.sync_all()?;
                std::fs::rename(&tmp_path, path)?;
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                i = i.saturating_add(1);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Atomically replace `path` with `bytes`. Exposed for callers writing whole
/// image files through the same temp-file discipline as containers.
pub fn atomic_write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), Error> {
    atomic_write(path.as_ref(), bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwdt_core::error::{ContainerError, Error};
    use dwdt_core::types::TypeId;

    #[test]
    fn container_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monsters.dwdt");
        let c = Container::build_at(TypeId(0x01), 0x5e5b, vec![7u8; 32], 42).unwrap();

        write_container_atomic(&path, &c).unwrap();
        let read = read_container(&path).unwrap();
        assert_eq!(read, c);
        // no temp files left behind
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("monsters.dwdt")]);
    }

    #[test]
    fn corrupt_file_fails_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dwdt");
        let c = Container::build_at(TypeId(0x01), 0, vec![1, 2, 3, 4], 0).unwrap();
        let mut bytes = c.serialize();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        std::fs::write(&path, &bytes).unwrap();

        match read_container(&path) {
            Err(Error::Container(ContainerError::ChecksumMismatch { .. })) => {}
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }
}
