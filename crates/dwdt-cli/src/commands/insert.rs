use crate::types::InsertJson;
use anyhow::Context;
use dwdt_tables::Registry;
use std::path::Path;

pub(crate) fn cmd_insert(
    registry: &Registry,
    container_path: &str,
    image_path: &str,
    out: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let container = dwdt_format::read_container(container_path)
        .with_context(|| format!("read container {container_path}"))?;
    let entry = registry.lookup(container.type_id())?;
    let out_path = out.unwrap_or(image_path);

    let backup = dwdt_ops::insert_into_image_file(
        Path::new(image_path),
        &container,
        entry,
        Path::new(out_path),
    )?;

    if json {
        let report = InsertJson {
            container: container_path,
            image: image_path,
            out: out_path,
            backup: backup.display().to_string(),
            image_offset: entry.image_offset,
            payload_size: entry.payload_size,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "inserted {} bytes at 0x{:x} -> {out_path} (backup: {})",
            entry.payload_size,
            entry.image_offset,
            backup.display()
        );
    }
    Ok(())
}
