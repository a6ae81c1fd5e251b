//! SCALE compact length prefixes and length-prefixed field cursors.
//!
//! Every nested byte sequence, text field and collection in an intent buffer
//! is sized by a compact prefix. The low two bits of the first byte select
//! the width class:
//! - `0b00` single byte, values `0..=63`
//! - `0b01` two bytes, values up to `2^14 - 1`
//! - `0b10` four bytes, values up to `2^30 - 1`
//! - `0b11` a header byte followed by 4 to 8 little-endian value bytes
//!
//! Decoding is canonical, so `encode(decode(x)) == x` for every accepted `x`.

pub mod compact;
pub mod error;
pub mod reader;
pub mod writer;

pub use compact::{
    compact_len, decode_compact, decode_compact_at, encode_compact, encoded_width, WidthClass,
    MAX_COMPACT_LEN, MAX_FOUR_BYTE, MAX_SINGLE_BYTE, MAX_TWO_BYTE,
};
pub use error::{CompactError, Result};
pub use reader::CompactReader;
pub use writer::{put_bytes, put_compact, put_text};
