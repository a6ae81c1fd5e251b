//! Decoding of length-prefixed intent collections and per-type statements.
//!
//! An intent buffer is a compact-prefixed list of `(type_tag, payload)`
//! records. Decoding happens in two tiers:
//! - [`decode_collection`] parses the outer framing. A corrupt frame fails
//!   the whole buffer.
//! - [`decode_statement`] interprets one payload by its tag. It never fails;
//!   a bad payload becomes [`DecodedStatement::Invalid`] for that record only.
//!
//! The [`expr`] module builds collections from intent expressions such as
//! `Password(hunter2) && Psp22(0x..., 100)`.

pub mod config;
pub mod error;
pub mod expr;
pub mod record;
pub mod registry;
pub mod statement;
pub mod tag;

pub use config::DecodeConfig;
pub use error::{ExpressionError, IntentError, Result};
pub use expr::{build_collection, build_statement, parse_expression, StatementBuilder};
pub use record::{
    decode_collection, decode_collection_with_config, encode_collection, encode_collection_into,
    DecodedIntent, IntentCollection, IntentRecord,
};
pub use registry::{decode_statement, StatementDecoder, StatementRegistry, BUILTIN_DECODERS};
pub use statement::{AccountId, DecodedStatement};
pub use tag::{PASSWORD, PSP22, SR25519};

/// Decode a buffer and every statement in it, in encoded order.
pub fn decode_intents(buf: &[u8]) -> Result<Vec<DecodedIntent>> {
    Ok(decode_collection(buf)?.decode_statements())
}
