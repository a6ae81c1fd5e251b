use crate::compact::decode_compact;
use crate::error::{CompactError, Result};

/// Cursor over a borrowed buffer of compact-prefixed fields.
///
/// A failed read leaves the cursor where it was; callers never observe a
/// partially consumed field.
#[derive(Debug, Clone)]
pub struct CompactReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> CompactReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Read a compact integer.
    pub fn read_compact(&mut self) -> Result<u64> {
        let (value, consumed) = decode_compact(self.rest())?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a compact integer used as a byte length.
    ///
    /// The length is not checked against the remaining input.
    pub fn read_len(&mut self) -> Result<usize> {
        let start = self.pos;
        let value = self.read_compact()?;
        usize::try_from(value).map_err(|_| {
            self.pos = start;
            CompactError::TruncatedInput {
                needed: usize::MAX,
                available: self.remaining(),
            }
        })
    }

    /// Read exactly `len` raw bytes.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(CompactError::TruncatedInput {
                needed: len,
                available,
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a length-prefixed byte sequence.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let result = self.read_len().and_then(|len| self.read_slice(len));
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Read a length-prefixed UTF-8 text field.
    pub fn read_text(&mut self) -> Result<&'a str> {
        let start = self.pos;
        let bytes = self.read_bytes()?;
        std::str::from_utf8(bytes).map_err(|_| {
            self.pos = start;
            CompactError::InvalidUtf8
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_sequential_fields() {
        let wire = [0x14, b'N', b'o', b't', b'e', b'!', 0x08, 0xab, 0xcd, 0x01, 0x01];
        let mut reader = CompactReader::new(&wire);

        assert_eq!(reader.read_text().unwrap(), "Note!");
        assert_eq!(reader.read_bytes().unwrap(), &[0xab, 0xcd]);
        assert_eq!(reader.read_compact().unwrap(), 64);
        assert!(reader.is_empty());
        assert_eq!(reader.position(), wire.len());
    }

    #[test]
    fn truncated_bytes_leave_cursor_untouched() {
        let wire = [0x00, 0x10, 0x01, 0x02];
        let mut reader = CompactReader::new(&wire);
        assert_eq!(reader.read_bytes().unwrap(), b"");

        let err = reader.read_bytes().unwrap_err();
        assert_eq!(
            err,
            CompactError::TruncatedInput {
                needed: 4,
                available: 2
            }
        );
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.rest(), &[0x10, 0x01, 0x02]);
    }

    #[test]
    fn invalid_text_is_rejected() {
        let wire = [0x08, 0xff, 0xfe];
        let mut reader = CompactReader::new(&wire);
        assert_eq!(reader.read_text(), Err(CompactError::InvalidUtf8));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_array_exact() {
        let wire = [1u8, 2, 3, 4, 5];
        let mut reader = CompactReader::new(&wire);
        assert_eq!(reader.read_array::<4>().unwrap(), [1, 2, 3, 4]);
        assert!(reader.read_array::<2>().is_err());
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn read_compact_on_empty_input() {
        let mut reader = CompactReader::new(&[]);
        assert!(matches!(
            reader.read_compact(),
            Err(CompactError::TruncatedInput { .. })
        ));
    }
}
