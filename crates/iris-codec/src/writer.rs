use bytes::BufMut;

use crate::compact::write_compact;

/// Append a compact integer.
pub fn put_compact<B: BufMut>(dst: &mut B, value: u64) {
    write_compact(value, dst);
}

/// Append a length-prefixed byte sequence.
pub fn put_bytes<B: BufMut>(dst: &mut B, bytes: &[u8]) {
    write_compact(bytes.len() as u64, dst);
    dst.put_slice(bytes);
}

/// Append a length-prefixed UTF-8 text field.
pub fn put_text<B: BufMut>(dst: &mut B, text: &str) {
    put_bytes(dst, text.as_bytes());
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::reader::CompactReader;

    #[test]
    fn put_text_prefixes_length() {
        let mut buf = BytesMut::new();
        put_text(&mut buf, "Psp22");
        assert_eq!(buf.as_ref(), &[0x14, b'P', b's', b'p', b'2', b'2']);
    }

    #[test]
    fn put_bytes_uses_wide_prefix_for_long_fields() {
        let payload = vec![0x5a; 300];
        let mut buf = BytesMut::new();
        put_bytes(&mut buf, &payload);

        assert_eq!(&buf[..2], &[0xb1, 0x04]);
        assert_eq!(buf.len(), 2 + payload.len());

        let mut reader = CompactReader::new(&buf);
        assert_eq!(reader.read_bytes().unwrap(), payload.as_slice());
    }

    #[test]
    fn put_compact_into_vec() {
        let mut out = Vec::new();
        put_compact(&mut out, 16_384);
        assert_eq!(out, vec![0x02, 0x00, 0x01, 0x00]);
    }
}
