//! Comment stream decoder
//!
//! The stream is a flat list of top-level fields. Field 1 carries one
//! length-delimited comment each; everything else at the top level is
//! metadata this decoder does not need.

use super::reader::{Tag, WireReader, WireType};
use crate::types::CommentRecord;

/// Top-level field holding a nested comment
const FIELD_COMMENT: u64 = 1;

// Comment fields
const FIELD_ID: u64 = 1;
const FIELD_OFFSET: u64 = 2;
const FIELD_MODE: u64 = 3;
const FIELD_FONT_SIZE: u64 = 4;
const FIELD_COLOR: u64 = 5;
const FIELD_SENDER_HASH: u64 = 6;
const FIELD_TEXT: u64 = 7;
const FIELD_CREATED_AT: u64 = 8;
const FIELD_ACTION: u64 = 9;
const FIELD_POOL: u64 = 10;
const FIELD_EXTERNAL_ID: u64 = 11;

/// Decode every comment in `data`, in stream order.
///
/// Never fails: malformed or truncated input ends decoding at the point where
/// it stops making sense, and a comment cut short keeps the fields that were
/// read before the cut.
pub fn decode(data: &[u8]) -> Vec<CommentRecord> {
    let mut reader = WireReader::new(data);
    let mut records = Vec::new();

    while let Some(tag) = reader.read_tag() {
        match tag {
            Tag {
                field: FIELD_COMMENT,
                wire_type: WireType::LengthDelimited,
            } => {
                let mut sub = reader.sub_reader();
                records.push(decode_comment(&mut sub));
            }
            Tag { field, wire_type } => {
                tracing::trace!(field, ?wire_type, "skipping top-level field");
                reader.skip(wire_type);
            }
        }
    }

    tracing::debug!(
        records = records.len(),
        bytes = data.len(),
        "decoded comment stream"
    );

    records
}

/// Decode several segment buffers of the same video and concatenate them.
pub fn decode_segments<I, B>(segments: I) -> Vec<CommentRecord>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut records = Vec::new();
    for (index, segment) in segments.into_iter().enumerate() {
        let decoded = decode(segment.as_ref());
        tracing::debug!(segment = index, records = decoded.len(), "decoded segment");
        records.extend(decoded);
    }
    records
}

fn decode_comment(reader: &mut WireReader<'_>) -> CommentRecord {
    let mut record = CommentRecord::default();

    while let Some(Tag { field, wire_type }) = reader.read_tag() {
        match (field, wire_type) {
            (FIELD_OFFSET, WireType::Varint) => record.offset_ms = reader.read_varint(),
            (FIELD_MODE, WireType::Varint) => record.mode = reader.read_varint() as u32,
            (FIELD_FONT_SIZE, WireType::Varint) => {
                record.font_size = reader.read_varint() as u32
            }
            (FIELD_COLOR, WireType::Varint) => {
                record.color = (reader.read_varint() & 0x00ff_ffff) as u32
            }
            (FIELD_SENDER_HASH, WireType::LengthDelimited) => {
                record.sender_hash = reader.read_string()
            }
            (FIELD_TEXT, WireType::LengthDelimited) => record.text = reader.read_string(),
            (FIELD_CREATED_AT, WireType::Varint) => {
                record.created_at = reader.read_varint() as i64
            }
            (FIELD_POOL, WireType::Varint) => record.pool = reader.read_varint() as u32,
            (FIELD_EXTERNAL_ID, WireType::LengthDelimited) => {
                record.external_id = reader.read_string()
            }
            (FIELD_ID | FIELD_ACTION, _) => reader.skip(wire_type),
            _ => {
                tracing::trace!(field, ?wire_type, "skipping comment field");
                reader.skip(wire_type);
            }
        }
    }

    record
}
