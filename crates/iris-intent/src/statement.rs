use std::fmt;

use iris_codec::{decode_compact, encoded_width, CompactReader};
use serde::{Serialize, Serializer};
use tracing::trace;

/// Length of an account identifier.
pub const ACCOUNT_ID_LEN: usize = 32;

/// Length of a PSP22 statement: account identifier + `u128` balance.
pub const PSP22_TUPLE_LEN: usize = ACCOUNT_ID_LEN + 16;

pub const BAD_PSP22_LENGTH: &str = "bad psp22 payload length";
pub const INVALID_LENGTH_PREFIX: &str = "invalid length prefix";
pub const INVALID_UTF8: &str = "invalid utf-8";

/// Opaque 32-byte account identifier. Rendered as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Human-readable interpretation of one intent payload.
///
/// Hex renderings are lowercase without a `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedStatement {
    /// An account and a PSP22 token amount.
    AccountBalance {
        account: AccountId,
        #[serde(serialize_with = "amount_as_string")]
        amount: u128,
    },
    /// Payload bytes rendered as hex.
    HexBytes(String),
    /// The intent type carries no statement.
    Empty,
    /// Payload interpreted as UTF-8 text.
    PlainText(String),
    /// The payload could not be interpreted.
    Invalid(String),
}

impl DecodedStatement {
    /// Short variant name, as used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountBalance { .. } => "account_balance",
            Self::HexBytes(_) => "hex_bytes",
            Self::Empty => "empty",
            Self::PlainText(_) => "plain_text",
            Self::Invalid(_) => "invalid",
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    fn invalid(reason: &str) -> Self {
        Self::Invalid(reason.to_string())
    }
}

impl fmt::Display for DecodedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountBalance { account, amount } => {
                write!(f, "account={account} amount={amount}")
            }
            Self::HexBytes(hex) => f.write_str(hex),
            Self::Empty => Ok(()),
            Self::PlainText(text) => f.write_str(text),
            Self::Invalid(reason) => write!(f, "(invalid statement: {reason})"),
        }
    }
}

fn amount_as_string<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(amount)
}

/// Decode a `Psp22` payload: a 32-byte account and a little-endian `u128`.
///
/// The tuple may be wrapped in a compact length prefix. An exact 48-byte
/// payload is taken as-is; otherwise one prefix is skipped, and the rest
/// must be exactly 48 bytes. The prefix width comes from its first byte and
/// its value is ignored.
pub fn decode_psp22(payload: &[u8]) -> DecodedStatement {
    let tuple = match psp22_tuple(payload) {
        Ok(tuple) => tuple,
        Err(reason) => return DecodedStatement::invalid(reason),
    };

    let mut reader = CompactReader::new(tuple);
    match (reader.read_array::<ACCOUNT_ID_LEN>(), reader.read_array::<16>()) {
        (Ok(account), Ok(amount)) => DecodedStatement::AccountBalance {
            account: AccountId(account),
            amount: u128::from_le_bytes(amount),
        },
        _ => DecodedStatement::invalid(BAD_PSP22_LENGTH),
    }
}

fn psp22_tuple(payload: &[u8]) -> Result<&[u8], &'static str> {
    if payload.len() == PSP22_TUPLE_LEN {
        return Ok(payload);
    }
    if payload.len() <= 1 {
        return Err(BAD_PSP22_LENGTH);
    }

    // Only the width matters here, so non-canonical prefixes are skipped too.
    let width = encoded_width(payload[0]);
    let rest = payload.get(width..).ok_or(INVALID_LENGTH_PREFIX)?;
    trace!(width, "skipping psp22 length prefix");

    if rest.len() != PSP22_TUPLE_LEN {
        return Err(BAD_PSP22_LENGTH);
    }
    Ok(rest)
}

/// Decode a `Password` payload: the bytes verbatim, as hex.
pub fn decode_password(payload: &[u8]) -> DecodedStatement {
    DecodedStatement::HexBytes(hex::encode(payload))
}

/// Decode an `Sr25519` payload. The format defines no statement.
pub fn decode_sr25519(_payload: &[u8]) -> DecodedStatement {
    DecodedStatement::Empty
}

/// Decode a payload of an unrecognised type as UTF-8 text.
///
/// Both raw text and text wrapped in one compact length prefix are
/// accepted. The prefix is only stripped when it is canonical and declares
/// exactly the number of bytes that follow it. Raw text whose leading bytes
/// happen to form such a prefix is therefore shortened: `"(hello wor)"`
/// decodes as `"hello wor)"`, since `(` is a compact 10.
pub fn decode_plain_text(payload: &[u8]) -> DecodedStatement {
    match std::str::from_utf8(unwrap_length_prefixed(payload)) {
        Ok(text) => DecodedStatement::PlainText(text.to_string()),
        Err(_) => DecodedStatement::invalid(INVALID_UTF8),
    }
}

fn unwrap_length_prefixed(payload: &[u8]) -> &[u8] {
    match decode_compact(payload) {
        Ok((declared, consumed)) if declared == (payload.len() - consumed) as u64 => {
            trace!(declared, consumed, "stripping text length prefix");
            &payload[consumed..]
        }
        _ => payload,
    }
}
