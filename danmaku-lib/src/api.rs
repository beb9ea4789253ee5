use crate::error::Result;
use crate::types::CommentRecord;
use std::path::Path;

pub use crate::markup::to_markup;
pub use crate::subtitle::{layout_events, to_subtitle, to_subtitle_with};
pub use crate::wire::{decode, decode_segments};

/// Read and decode segment files, concatenating records in argument order
pub fn decode_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<CommentRecord>> {
    let mut buffers = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "read segment file");
        buffers.push(data);
    }
    Ok(decode_segments(&buffers))
}

/// Serialize records as a pretty-printed JSON array
pub fn to_json(records: &[CommentRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DanmakuError;
    use crate::tests::fixtures::{encode_records, sample_records};
    use tempfile::tempdir;

    #[test]
    fn test_decode_files_in_order() {
        let dir = tempdir().unwrap();
        let records = sample_records(10);

        let first = dir.path().join("seg1.bin");
        let second = dir.path().join("seg2.bin");
        std::fs::write(&first, encode_records(&records[..4])).unwrap();
        std::fs::write(&second, encode_records(&records[4..])).unwrap();

        let decoded = decode_files(&[&first, &second]).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_decode_files_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.bin");
        let err = decode_files(&[missing]).unwrap_err();
        assert!(matches!(err, DanmakuError::Io(_)));
    }

    #[test]
    fn test_to_json() {
        let records = sample_records(3);
        let json = to_json(&records).unwrap();
        let back: Vec<CommentRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
