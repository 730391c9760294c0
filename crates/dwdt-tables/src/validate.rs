use crate::registry::TypeEntry;
use dwdt_core::error::ValidationError;
use dwdt_core::types::{FieldRule, Record, RecordSet};

/// Proof that a record set passed [`validate`] against a type entry.
///
/// The packer takes this token rather than a raw `RecordSet`, so "validated
/// before pack" is enforced by the type system instead of a runtime re-check.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRecords<'a> {
    set: &'a RecordSet,
}

impl<'a> ValidatedRecords<'a> {
    pub fn records(&self) -> &'a RecordSet {
        self.set
    }
}

/// Check every record and every declared field, returning the first
/// violation in record order then declared-field order.
pub fn validate<'a>(
    set: &'a RecordSet,
    entry: &TypeEntry,
) -> Result<ValidatedRecords<'a>, ValidationError> {
    match collect_violations(set, entry, true).into_iter().next() {
        Some(v) => Err(v),
        None => Ok(ValidatedRecords { set }),
    }
}

/// Exhaustive variant of [`validate`]: every violation, not just the first.
pub fn validate_all(set: &RecordSet, entry: &TypeEntry) -> Vec<ValidationError> {
    collect_violations(set, entry, false)
}

fn collect_violations(
    set: &RecordSet,
    entry: &TypeEntry,
    first_only: bool,
) -> Vec<ValidationError> {
    let mut out = Vec::new();

    if set.records.len() as u32 != entry.record_count {
        out.push(ValidationError {
            record: set.records.len(),
            field: "record_count".to_string(),
            value: 0,
            reason: format!(
                "expected {} records, found {}",
                entry.record_count,
                set.records.len()
            ),
        });
        if first_only {
            return out;
        }
    }

    for (index, record) in set.records.iter().enumerate() {
        check_record(index, record, entry, &mut out);
        if first_only && !out.is_empty() {
            out.truncate(1);
            return out;
        }
    }

    out
}

fn check_record(
    index: usize,
    record: &Record,
    entry: &TypeEntry,
    out: &mut Vec<ValidationError>,
) {
    for spec in &entry.fields {
        let mut found = record.fields.iter().filter(|f| f.name == spec.name);
        let Some(first) = found.next() else {
            out.push(ValidationError {
                record: index,
                field: spec.name.clone(),
                value: 0,
                reason: "missing declared field".to_string(),
            });
            continue;
        };
        if found.next().is_some() {
            out.push(ValidationError {
                record: index,
                field: spec.name.clone(),
                value: first.value,
                reason: "field appears more than once".to_string(),
            });
            continue;
        }
        let value = first.value;
        if value > spec.width.max_value() {
            out.push(ValidationError {
                record: index,
                field: spec.name.clone(),
                value,
                reason: format!("exceeds storage width (max {})", spec.width.max_value()),
            });
            continue;
        }
        match &spec.rule {
            FieldRule::Range { min, max } => {
                if value < *min || value > *max {
                    out.push(ValidationError {
                        record: index,
                        field: spec.name.clone(),
                        value,
                        reason: format!("must be in {min}..={max}"),
                    });
                }
            }
            FieldRule::Enum(allowed) => {
                if !allowed.contains(&value) {
                    out.push(ValidationError {
                        record: index,
                        field: spec.name.clone(),
                        value,
                        reason: format!("must be one of {allowed:?}"),
                    });
                }
            }
        }
    }

    for fv in &record.fields {
        if !entry.fields.iter().any(|spec| spec.name == fv.name) {
            out.push(ValidationError {
                record: index,
                field: fv.name.clone(),
                value: fv.value,
                reason: "not a declared field".to_string(),
            });
        }
    }

    let expected_remainder = entry.remainder_len() as usize;
    if record.remainder.len() != expected_remainder {
        out.push(ValidationError {
            record: index,
            field: "remainder".to_string(),
            value: 0,
            reason: format!(
                "remainder must be {expected_remainder} bytes, found {}",
                record.remainder.len()
            ),
        });
    }
}
