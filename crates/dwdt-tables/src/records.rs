use crate::registry::TypeEntry;
use crate::validate::ValidatedRecords;
use dwdt_core::error::PipelineError;
use dwdt_core::types::{FieldValue, FieldWidth, Record, RecordSet};

/// Positions of one record's stride slice claimed by declared fields.
/// Index i is true when byte i belongs to some field.
fn claimed_map(entry: &TypeEntry) -> Vec<bool> {
    let mut claimed = vec![false; entry.record_stride as usize];
    for field in &entry.fields {
        let start = field.offset as usize;
        let end = start + field.width.size_bytes() as usize;
        for slot in &mut claimed[start..end] {
            *slot = true;
        }
    }
    claimed
}

/// Structurally decode a payload into one record per stride slice.
///
/// Bytes not claimed by a declared field are retained as the record's opaque
/// remainder, so an unedited set re-encodes to the original payload exactly.
pub fn decode_records(entry: &TypeEntry, payload: &[u8]) -> Result<RecordSet, PipelineError> {
    if payload.len() as u32 != entry.payload_size {
        return Err(PipelineError::SizeMismatch {
            expected: entry.payload_size,
            actual: payload.len() as u32,
        });
    }

    let stride = entry.record_stride as usize;
    let claimed = claimed_map(entry);
    let mut records = Vec::with_capacity(entry.record_count as usize);

    for chunk in payload.chunks_exact(stride) {
        let mut fields = Vec::with_capacity(entry.fields.len());
        for spec in &entry.fields {
            let at = spec.offset as usize;
            let value = match spec.width {
                FieldWidth::U8 => chunk[at] as u16,
                FieldWidth::U16 => u16::from_le_bytes([chunk[at], chunk[at + 1]]),
            };
            fields.push(FieldValue {
                name: spec.name.clone(),
                value,
            });
        }
        let remainder = chunk
            .iter()
            .zip(&claimed)
            .filter(|(_, c)| !**c)
            .map(|(b, _)| *b)
            .collect();
        records.push(Record { fields, remainder });
    }

    Ok(RecordSet {
        type_id: entry.type_id,
        records,
    })
}

/// Re-serialize a validated record set into exactly `entry.payload_size`
/// bytes. Declared fields are written little-endian at their offsets; the
/// remainder fills the unclaimed positions in order.
///
/// Validation guarantees every declared field is present and every remainder
/// has the right length, so this cannot fail for a set that came through
/// [`crate::validate`]; a disagreement here would be an internal invariant
/// violation, not caller input.
pub fn encode_records(validated: &ValidatedRecords<'_>, entry: &TypeEntry) -> Vec<u8> {
    let set = validated.records();
    let stride = entry.record_stride as usize;
    let claimed = claimed_map(entry);
    let mut payload = Vec::with_capacity(entry.payload_size as usize);

    for record in &set.records {
        let mut buf = vec![0u8; stride];
        let mut rest = record.remainder.iter();
        for (i, slot) in buf.iter_mut().enumerate() {
            if !claimed[i] {
                *slot = *rest.next().unwrap_or(&0);
            }
        }
        for spec in &entry.fields {
            let value = record.field(&spec.name).unwrap_or(0);
            let at = spec.offset as usize;
            match spec.width {
                FieldWidth::U8 => buf[at] = value as u8,
                FieldWidth::U16 => buf[at..at + 2].copy_from_slice(&value.to_le_bytes()),
            }
        }
        payload.extend_from_slice(&buf);
    }

    debug_assert_eq!(payload.len() as u32, entry.payload_size);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use dwdt_core::types::{FieldRule, FieldSpec, TypeId};

    fn monster_entry() -> TypeEntry {
        TypeEntry {
            type_id: TypeId(0x01),
            name: "monsters".to_string(),
            image_offset: 0x5e5b,
            payload_size: 32,
            record_count: 2,
            record_stride: 16,
            fields: vec![
                FieldSpec {
                    name: "strength".to_string(),
                    offset: 0,
                    width: FieldWidth::U8,
                    rule: FieldRule::Range { min: 0, max: 255 },
                },
                FieldSpec {
                    name: "gold".to_string(),
                    offset: 6,
                    width: FieldWidth::U16,
                    rule: FieldRule::Range { min: 0, max: 1023 },
                },
            ],
        }
    }

    fn sample_payload() -> Vec<u8> {
        let mut p: Vec<u8> = (0u8..32).collect();
        // keep "gold" within its declared range in both records
        p[6] = 0x34;
        p[7] = 0x02; // 0x0234 = 564
        p[22] = 0x10;
        p[23] = 0x00;
        p
    }

    #[test]
    fn decode_reads_fields_and_remainder() {
        let entry = monster_entry();
        let payload = sample_payload();
        let set = decode_records(&entry, &payload).unwrap();

        assert_eq!(set.type_id, TypeId(0x01));
        assert_eq!(set.records.len(), 2);
        let first = &set.records[0];
        assert_eq!(first.field("strength"), Some(0));
        assert_eq!(first.field("gold"), Some(0x0234));
        // stride 16, 3 bytes claimed -> 13 remainder bytes
        assert_eq!(first.remainder.len(), 13);
        assert_eq!(first.remainder[0], 1); // byte 1 is unclaimed
        let second = &set.records[1];
        assert_eq!(second.field("strength"), Some(16));
        assert_eq!(second.field("gold"), Some(0x0010));
    }

    #[test]
    fn unedited_set_round_trips_exactly() {
        let entry = monster_entry();
        let payload = sample_payload();
        let set = decode_records(&entry, &payload).unwrap();
        let validated = validate(&set, &entry).unwrap();
        assert_eq!(encode_records(&validated, &entry), payload);
    }

    #[test]
    fn edited_field_lands_at_its_offset_only() {
        let entry = monster_entry();
        let payload = sample_payload();
        let mut set = decode_records(&entry, &payload).unwrap();
        assert!(set.records[1].set_field("strength", 9));

        let validated = validate(&set, &entry).unwrap();
        let encoded = encode_records(&validated, &entry);
        assert_eq!(encoded[16], 9);
        for (i, (a, b)) in payload.iter().zip(&encoded).enumerate() {
            if i != 16 {
                assert_eq!(a, b, "byte {i} changed unexpectedly");
            }
        }
    }

    #[test]
    fn u16_fields_encode_little_endian() {
        let entry = monster_entry();
        let mut set = decode_records(&entry, &sample_payload()).unwrap();
        assert!(set.records[0].set_field("gold", 0x0102));
        let validated = validate(&set, &entry).unwrap();
        let encoded = encode_records(&validated, &entry);
        assert_eq!(encoded[6], 0x02);
        assert_eq!(encoded[7], 0x01);
    }

    #[test]
    fn wrong_payload_size_is_rejected() {
        let entry = monster_entry();
        match decode_records(&entry, &[0u8; 31]) {
            Err(PipelineError::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, 32);
                assert_eq!(actual, 31);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }
}
