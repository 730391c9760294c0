use crate::types::{ValidateJson, ViolationJson};
use dwdt_tables::Registry;

pub(crate) fn cmd_validate(
    registry: &Registry,
    records_path: &str,
    json: bool,
) -> anyhow::Result<()> {
    let set = crate::util::read_records(records_path)?;
    let entry = registry.lookup(set.type_id)?;
    let violations = dwdt_tables::validate_all(&set, entry);

    if json {
        let out = ValidateJson {
            ok: violations.is_empty(),
            path: records_path,
            violations: violations
                .iter()
                .map(|v| ViolationJson {
                    record: v.record,
                    field: v.field.clone(),
                    value: v.value,
                    reason: v.reason.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        if out.ok {
            Ok(())
        } else {
            std::process::exit(1);
        }
    } else if violations.is_empty() {
        println!("OK: {records_path}");
        Ok(())
    } else {
        for v in &violations {
            eprintln!("INVALID: {records_path}: {v}");
        }
        anyhow::bail!("{} violation(s) in {records_path}", violations.len());
    }
}
