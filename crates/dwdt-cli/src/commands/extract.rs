use crate::types::ExtractJson;
use anyhow::Context;
use dwdt_ops::RomImage;
use dwdt_tables::Registry;

pub(crate) fn cmd_extract(
    registry: &Registry,
    image_path: &str,
    type_spec: &str,
    out: &str,
    json: bool,
) -> anyhow::Result<()> {
    let entry = crate::util::resolve_type(registry, type_spec)?;
    let image = RomImage::open(image_path).with_context(|| format!("open image {image_path}"))?;

    let container = dwdt_ops::extract(&image, registry, entry.type_id)?;
    dwdt_format::write_container_atomic(out, &container)
        .with_context(|| format!("write container {out}"))?;

    if json {
        let report = ExtractJson {
            image: image_path,
            type_id: entry.type_id.get(),
            type_name: &entry.name,
            out,
            source_offset: container.source_offset(),
            payload_size: container.payload_size(),
            checksum: format!("{:08x}", container.checksum()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "extracted {} ({} bytes at 0x{:x}) -> {out}",
            entry.name,
            container.payload_size(),
            container.source_offset()
        );
    }
    Ok(())
}
