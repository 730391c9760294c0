use crate::types::InspectJson;
use anyhow::Context;

pub(crate) fn cmd_inspect(container_path: &str, json: bool) -> anyhow::Result<()> {
    let container = dwdt_format::read_container(container_path)
        .with_context(|| format!("read container {container_path}"))?;

    if json {
        let out = InspectJson {
            path: container_path,
            version_major: container.version_major(),
            version_minor: container.version_minor(),
            type_id: container.type_id().get(),
            payload_size: container.payload_size(),
            source_offset: container.source_offset(),
            checksum: format!("{:08x}", container.checksum()),
            timestamp: container.timestamp(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{container_path}:");
        println!(
            "  version       {}.{}",
            container.version_major(),
            container.version_minor()
        );
        println!("  type          {}", container.type_id());
        println!("  payload_size  {}", container.payload_size());
        println!("  source_offset 0x{:x}", container.source_offset());
        println!("  checksum      {:08x}", container.checksum());
        println!("  timestamp     {}", container.timestamp());
    }
    Ok(())
}
