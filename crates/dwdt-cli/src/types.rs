use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct ExtractJson<'a> {
    pub(crate) image: &'a str,
    pub(crate) type_id: u8,
    pub(crate) type_name: &'a str,
    pub(crate) out: &'a str,
    pub(crate) source_offset: u32,
    pub(crate) payload_size: u32,
    pub(crate) checksum: String,
}

#[derive(Serialize)]
pub(crate) struct UnpackJson<'a> {
    pub(crate) container: &'a str,
    pub(crate) type_id: u8,
    pub(crate) type_name: &'a str,
    pub(crate) out: &'a str,
    pub(crate) records: usize,
}

#[derive(Serialize)]
pub(crate) struct PackJson<'a> {
    pub(crate) records: &'a str,
    pub(crate) type_id: u8,
    pub(crate) type_name: &'a str,
    pub(crate) out: &'a str,
    pub(crate) payload_size: u32,
    pub(crate) checksum: String,
}

#[derive(Serialize)]
pub(crate) struct InsertJson<'a> {
    pub(crate) container: &'a str,
    pub(crate) image: &'a str,
    pub(crate) out: &'a str,
    pub(crate) backup: String,
    pub(crate) image_offset: u32,
    pub(crate) payload_size: u32,
}

#[derive(Serialize)]
pub(crate) struct ValidateJson<'a> {
    pub(crate) ok: bool,
    pub(crate) path: &'a str,
    pub(crate) violations: Vec<ViolationJson>,
}

#[derive(Serialize)]
pub(crate) struct ViolationJson {
    pub(crate) record: usize,
    pub(crate) field: String,
    pub(crate) value: u16,
    pub(crate) reason: String,
}

#[derive(Serialize)]
pub(crate) struct InspectJson<'a> {
    pub(crate) path: &'a str,
    pub(crate) version_major: u8,
    pub(crate) version_minor: u8,
    pub(crate) type_id: u8,
    pub(crate) payload_size: u32,
    pub(crate) source_offset: u32,
    pub(crate) checksum: String,
    pub(crate) timestamp: u32,
}

#[derive(Serialize)]
pub(crate) struct TablesJson {
    pub(crate) types: Vec<TableEntryJson>,
}

#[derive(Serialize)]
pub(crate) struct TableEntryJson {
    pub(crate) type_id: u8,
    pub(crate) name: String,
    pub(crate) image_offset: u32,
    pub(crate) payload_size: u32,
    pub(crate) record_count: u32,
    pub(crate) record_stride: u32,
    pub(crate) fields: Vec<String>,
}
