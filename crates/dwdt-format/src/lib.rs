mod container;
mod io;

pub use container::{
    Container, HEADER_LEN, MAGIC_DWDT, MAX_PAYLOAD_SIZE, VERSION_MAJOR, VERSION_MINOR,
};

pub use io::{atomic_write_bytes, read_container, write_container_atomic};
