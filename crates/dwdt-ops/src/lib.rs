//! Pipeline stage orchestration: extract, unpack, pack, insert.
//!
//! Stages are pure functions over immutable inputs; the strict intra-type
//! sequence is `extract -> unpack -> validate -> pack -> insert`, and a
//! failure at any stage is terminal for that type's run. Different type ids
//! touch disjoint image ranges (enforced at registry startup), so their
//! pipelines may run concurrently without coordination.

mod extract;
mod image;
mod insert;
mod pack;
mod unpack;

pub use extract::extract;
pub use image::RomImage;
pub use insert::{insert, insert_into_image_file};
pub use pack::{pack, pack_at};
pub use unpack::unpack;
