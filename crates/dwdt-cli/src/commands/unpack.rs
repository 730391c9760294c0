use crate::types::UnpackJson;
use anyhow::Context;
use dwdt_tables::Registry;

pub(crate) fn cmd_unpack(
    registry: &Registry,
    container_path: &str,
    out: &str,
    type_spec: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let container = dwdt_format::read_container(container_path)
        .with_context(|| format!("read container {container_path}"))?;
    // An explicit --type cross-checks the container; otherwise the embedded
    // type id picks the entry.
    let entry = match type_spec {
        Some(spec) => crate::util::resolve_type(registry, spec)?,
        None => registry.lookup(container.type_id())?,
    };

    let set = dwdt_ops::unpack(&container, entry)?;
    crate::util::write_records_pretty(out, &set)?;

    if json {
        let report = UnpackJson {
            container: container_path,
            type_id: entry.type_id.get(),
            type_name: &entry.name,
            out,
            records: set.records.len(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "unpacked {} into {} records -> {out}",
            entry.name,
            set.records.len()
        );
    }
    Ok(())
}
