use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CompactError, Result};

/// Largest value carried by the single-byte form.
pub const MAX_SINGLE_BYTE: u64 = (1 << 6) - 1;

/// Largest value carried by the two-byte form.
pub const MAX_TWO_BYTE: u64 = (1 << 14) - 1;

/// Largest value carried by the four-byte form.
pub const MAX_FOUR_BYTE: u64 = (1 << 30) - 1;

/// Longest encoding of a `u64`: header byte + 8 value bytes.
pub const MAX_COMPACT_LEN: usize = 9;

const MODE_MASK: u8 = 0b11;
const MODE_SINGLE: u8 = 0b00;
const MODE_TWO: u8 = 0b01;
const MODE_FOUR: u8 = 0b10;
const MODE_BIG: u8 = 0b11;

/// Smallest number of value bytes in the big-integer form.
const BIG_MIN_BYTES: usize = 4;

/// Width class of a compact encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Single,
    Two,
    Four,
    /// Header byte followed by this many little-endian value bytes (4..=8).
    Big(u8),
}

impl WidthClass {
    /// Minimal class able to represent `value`.
    pub fn for_value(value: u64) -> Self {
        if value <= MAX_SINGLE_BYTE {
            Self::Single
        } else if value <= MAX_TWO_BYTE {
            Self::Two
        } else if value <= MAX_FOUR_BYTE {
            Self::Four
        } else {
            let significant = (u64::BITS - value.leading_zeros()).div_ceil(8) as usize;
            Self::Big(significant.max(BIG_MIN_BYTES) as u8)
        }
    }

    /// Total bytes on the wire, header included.
    pub fn encoded_len(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Big(n) => 1 + n as usize,
        }
    }
}

/// Number of bytes `encode_compact(value)` produces.
pub fn compact_len(value: u64) -> usize {
    WidthClass::for_value(value).encoded_len()
}

/// Width in bytes of the encoding that starts with `first`, header included.
///
/// Depends on the first byte alone; the value bytes are not inspected, so
/// non-canonical and over-wide encodings still report their width.
pub fn encoded_width(first: u8) -> usize {
    match first & MODE_MASK {
        MODE_SINGLE => 1,
        MODE_TWO => 2,
        MODE_FOUR => 4,
        _ => 1 + usize::from(first >> 2) + BIG_MIN_BYTES,
    }
}

/// Decode a compact integer from the start of `src`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_compact(src: &[u8]) -> Result<(u64, usize)> {
    let first = *src.first().ok_or(CompactError::TruncatedInput {
        needed: 1,
        available: 0,
    })?;

    match first & MODE_MASK {
        MODE_SINGLE => Ok((u64::from(first >> 2), 1)),
        MODE_TWO => {
            let value = u64::from(u16::from_le_bytes(take::<2>(src)?) >> 2);
            check_canonical(value, MAX_SINGLE_BYTE, 2)?;
            Ok((value, 2))
        }
        MODE_FOUR => {
            let value = u64::from(u32::from_le_bytes(take::<4>(src)?) >> 2);
            check_canonical(value, MAX_TWO_BYTE, 4)?;
            Ok((value, 4))
        }
        _ => {
            let width = encoded_width(first);
            let n = width - 1;
            if width > MAX_COMPACT_LEN {
                return Err(CompactError::Overflow { width });
            }
            let raw = src.get(1..width).ok_or(CompactError::TruncatedInput {
                needed: width,
                available: src.len(),
            })?;

            let mut le = [0u8; 8];
            le[..n].copy_from_slice(raw);
            let value = u64::from_le_bytes(le);

            // The most significant byte must be occupied, otherwise a shorter
            // big form (or a fixed class) would have been chosen.
            if raw[n - 1] == 0 {
                return Err(CompactError::NonCanonical { value, width });
            }
            check_canonical(value, MAX_FOUR_BYTE, width)?;
            Ok((value, width))
        }
    }
}

/// Decode a compact integer starting at `offset` within `buf`.
pub fn decode_compact_at(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let src = buf.get(offset..).ok_or(CompactError::TruncatedInput {
        needed: offset.saturating_add(1),
        available: buf.len(),
    })?;
    decode_compact(src)
}

/// Encode `value` in its minimal width class.
pub fn encode_compact(value: u64) -> Bytes {
    let mut dst = BytesMut::with_capacity(compact_len(value));
    write_compact(value, &mut dst);
    dst.freeze()
}

pub(crate) fn write_compact<B: BufMut>(value: u64, dst: &mut B) {
    match WidthClass::for_value(value) {
        WidthClass::Single => dst.put_u8(((value as u8) << 2) | MODE_SINGLE),
        WidthClass::Two => dst.put_u16_le(((value as u16) << 2) | u16::from(MODE_TWO)),
        WidthClass::Four => dst.put_u32_le(((value as u32) << 2) | u32::from(MODE_FOUR)),
        WidthClass::Big(n) => {
            let header = ((n - BIG_MIN_BYTES as u8) << 2) | MODE_BIG;
            dst.put_u8(header);
            dst.put_slice(&value.to_le_bytes()[..usize::from(n)]);
        }
    }
}

fn take<const N: usize>(src: &[u8]) -> Result<[u8; N]> {
    src.get(..N)
        .and_then(|raw| raw.try_into().ok())
        .ok_or(CompactError::TruncatedInput {
            needed: N,
            available: src.len(),
        })
}

fn check_canonical(value: u64, narrower_max: u64, width: usize) -> Result<()> {
    if value <= narrower_max {
        return Err(CompactError::NonCanonical { value, width });
    }
    Ok(())
}
