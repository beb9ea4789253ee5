//! Bounded cursor over a length-delimited wire buffer.
//!
//! A [`WireReader`] borrows the whole input and walks the byte range
//! `[pos, limit)`. Nested messages get their own reader over a sub-range of
//! the same buffer, so no bytes are copied while decoding.
//!
//! Every read is total: running into the limit yields whatever could be read
//! and leaves the cursor at the limit instead of failing.

/// Wire type of a field, taken from the low 3 bits of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    Fixed32,
    /// Groups and reserved values; the rest of the scope cannot be trusted.
    Unsupported(u8),
}

impl WireType {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            5 => WireType::Fixed32,
            other => WireType::Unsupported(other),
        }
    }
}

/// A decoded field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field: u64,
    pub wire_type: WireType,
}

/// Maximum number of bytes that can contribute bits to a 64-bit varint
const MAX_VARINT_BYTES: u32 = 10;

#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> WireReader<'a> {
    /// Reader over the whole buffer
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            limit: buf.len(),
        }
    }

    /// Current offset into the underlying buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the scope limit
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.limit
    }

    /// Read a base-128 varint.
    ///
    /// A varint cut off by the scope limit returns the bits read so far.
    /// Bytes past the tenth still advance the cursor but add no bits.
    pub fn read_varint(&mut self) -> u64 {
        let mut value: u64 = 0;
        let mut count: u32 = 0;
        while self.pos < self.limit {
            let byte = self.buf[self.pos];
            self.pos += 1;
            if count < MAX_VARINT_BYTES {
                let shift = 7 * count;
                if shift < 64 {
                    value |= u64::from(byte & 0x7f) << shift;
                }
            }
            count += 1;
            if byte & 0x80 == 0 {
                break;
            }
        }
        value
    }

    /// Read the next field tag, or `None` once the scope is exhausted.
    ///
    /// A zero tag is not a valid field header and also ends the scope.
    pub fn read_tag(&mut self) -> Option<Tag> {
        if self.is_at_end() {
            return None;
        }
        let raw = self.read_varint();
        if raw == 0 {
            self.skip_to_end();
            return None;
        }
        Some(Tag {
            field: raw >> 3,
            wire_type: WireType::from_bits((raw & 0x07) as u8),
        })
    }

    /// Read a length prefix and return the following bytes, clamped to the scope.
    pub fn read_bytes(&mut self) -> &'a [u8] {
        let len = self.read_length();
        let start = self.pos;
        self.pos += len;
        &self.buf[start..self.pos]
    }

    /// Read a length-delimited UTF-8 string. Invalid sequences are replaced.
    pub fn read_string(&mut self) -> String {
        String::from_utf8_lossy(self.read_bytes()).into_owned()
    }

    /// Read a length prefix and return a reader bounded to the following bytes.
    ///
    /// The parent cursor moves past the nested range.
    pub fn sub_reader(&mut self) -> WireReader<'a> {
        let len = self.read_length();
        let child = WireReader {
            buf: self.buf,
            pos: self.pos,
            limit: self.pos + len,
        };
        self.pos += len;
        child
    }

    /// Skip a field's value according to its wire type.
    pub fn skip(&mut self, wire_type: WireType) {
        match wire_type {
            WireType::Varint => {
                self.read_varint();
            }
            WireType::Fixed64 => self.advance(8),
            WireType::LengthDelimited => {
                let len = self.read_length();
                self.advance(len);
            }
            WireType::Fixed32 => self.advance(4),
            WireType::Unsupported(_) => self.skip_to_end(),
        }
    }

    pub fn skip_to_end(&mut self) {
        self.pos = self.limit;
    }

    fn advance(&mut self, n: usize) {
        self.pos += n.min(self.remaining());
    }

    fn read_length(&mut self) -> usize {
        let declared = self.read_varint();
        usize::try_from(declared)
            .unwrap_or(usize::MAX)
            .min(self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_varint() {
        let mut reader = WireReader::new(&[0x96, 0x01]);
        assert_eq!(reader.read_varint(), 150);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_read_varint_truncated() {
        // Continuation bit set but nothing follows
        let mut reader = WireReader::new(&[0x96]);
        assert_eq!(reader.read_varint(), 0x16);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_read_varint_overlong() {
        let mut buf = vec![0xff; 14];
        buf.push(0x01);
        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_varint(), u64::MAX);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_read_tag() {
        // field 7, wire type 2
        let mut reader = WireReader::new(&[0x3a]);
        let tag = reader.read_tag().unwrap();
        assert_eq!(tag.field, 7);
        assert_eq!(tag.wire_type, WireType::LengthDelimited);
        assert!(reader.read_tag().is_none());
    }

    #[test]
    fn test_zero_tag_ends_scope() {
        let mut reader = WireReader::new(&[0x00, 0x08, 0x01]);
        assert!(reader.read_tag().is_none());
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_read_bytes_clamped() {
        // Declares 10 bytes, only 3 present
        let mut reader = WireReader::new(&[0x0a, b'a', b'b', b'c']);
        assert_eq!(reader.read_bytes(), b"abc");
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_read_string_lossy() {
        let mut reader = WireReader::new(&[0x02, 0xff, b'x']);
        assert_eq!(reader.read_string(), "\u{fffd}x");
    }

    #[test]
    fn test_sub_reader_bounds() {
        let buf = [0x02, 0x08, 0x05, 0x10, 0x07];
        let mut parent = WireReader::new(&buf);
        let mut child = parent.sub_reader();
        assert_eq!(child.remaining(), 2);
        assert_eq!(parent.position(), 3);

        let tag = child.read_tag().unwrap();
        assert_eq!(tag.field, 1);
        assert_eq!(child.read_varint(), 5);
        assert!(child.read_tag().is_none());

        let tag = parent.read_tag().unwrap();
        assert_eq!(tag.field, 2);
        assert_eq!(parent.read_varint(), 7);
    }

    #[test]
    fn test_skip_fixed_clamped() {
        let mut reader = WireReader::new(&[1, 2, 3]);
        reader.skip(WireType::Fixed64);
        assert!(reader.is_at_end());

        let mut reader = WireReader::new(&[1, 2, 3, 4, 5]);
        reader.skip(WireType::Fixed32);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_skip_unsupported() {
        let mut reader = WireReader::new(&[1, 2, 3]);
        reader.skip(WireType::Unsupported(3));
        assert!(reader.is_at_end());
    }
}
