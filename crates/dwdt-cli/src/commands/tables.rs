use crate::types::{TableEntryJson, TablesJson};
use dwdt_tables::Registry;

pub(crate) fn cmd_tables(registry: &Registry, json: bool) -> anyhow::Result<()> {
    if json {
        let out = TablesJson {
            types: registry
                .entries()
                .iter()
                .map(|e| TableEntryJson {
                    type_id: e.type_id.get(),
                    name: e.name.clone(),
                    image_offset: e.image_offset,
                    payload_size: e.payload_size,
                    record_count: e.record_count,
                    record_stride: e.record_stride,
                    fields: e.fields.iter().map(|f| f.name.clone()).collect(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for e in registry.entries() {
            println!(
                "{}  {:<10} offset 0x{:x}  {} records x {} bytes",
                e.type_id, e.name, e.image_offset, e.record_count, e.record_stride
            );
        }
    }
    Ok(())
}
