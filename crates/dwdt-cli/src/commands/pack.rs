use crate::types::PackJson;
use anyhow::Context;
use dwdt_tables::Registry;

pub(crate) fn cmd_pack(
    registry: &Registry,
    records_path: &str,
    out: &str,
    json: bool,
) -> anyhow::Result<()> {
    let set = crate::util::read_records(records_path)?;
    let entry = registry.lookup(set.type_id)?;

    // Validation is the gate between the editable form and a container;
    // a set that fails here never reaches the packer.
    let validated = dwdt_tables::validate(&set, entry)?;
    let container = dwdt_ops::pack(validated, entry)?;
    dwdt_format::write_container_atomic(out, &container)
        .with_context(|| format!("write container {out}"))?;

    if json {
        let report = PackJson {
            records: records_path,
            type_id: entry.type_id.get(),
            type_name: &entry.name,
            out,
            payload_size: container.payload_size(),
            checksum: format!("{:08x}", container.checksum()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "packed {} records of {} -> {out}",
            set.records.len(),
            entry.name
        );
    }
    Ok(())
}
