use std::collections::HashMap;

use tracing::warn;

use crate::statement::{
    decode_password, decode_plain_text, decode_psp22, decode_sr25519, DecodedStatement,
};
use crate::tag::{PASSWORD, PSP22, SR25519};

/// Turns one payload into a statement. Must not panic.
pub type StatementDecoder = fn(&[u8]) -> DecodedStatement;

/// Decoders for the known intent types, matched by exact tag.
///
/// Adding an intent type is one entry here.
pub const BUILTIN_DECODERS: &[(&str, StatementDecoder)] = &[
    (PSP22, decode_psp22),
    (PASSWORD, decode_password),
    (SR25519, decode_sr25519),
];

/// Decoder used for tags with no entry.
pub const FALLBACK_DECODER: StatementDecoder = decode_plain_text;

/// Decode one payload using the built-in table.
///
/// Never fails: payload problems come back as [`DecodedStatement::Invalid`].
pub fn decode_statement(type_tag: &str, payload: &[u8]) -> DecodedStatement {
    let decoder = BUILTIN_DECODERS
        .iter()
        .find(|(tag, _)| *tag == type_tag)
        .map_or(FALLBACK_DECODER, |(_, decoder)| *decoder);
    run_decoder(decoder, type_tag, payload)
}

fn run_decoder(decoder: StatementDecoder, type_tag: &str, payload: &[u8]) -> DecodedStatement {
    let statement = decoder(payload);
    if let DecodedStatement::Invalid(reason) = &statement {
        warn!(
            type_tag,
            payload_len = payload.len(),
            reason = %reason,
            "statement could not be decoded"
        );
    }
    statement
}

/// Tag-keyed table of statement decoders with a fallback.
///
/// Starts from [`BUILTIN_DECODERS`]; callers may register more types or
/// override existing ones.
#[derive(Clone)]
pub struct StatementRegistry {
    decoders: HashMap<String, StatementDecoder>,
    fallback: StatementDecoder,
}

impl StatementRegistry {
    /// Create a registry holding the built-in decoders.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (tag, decoder) in BUILTIN_DECODERS {
            registry.register(*tag, *decoder);
        }
        registry
    }

    /// Create a registry where every tag goes to the plain-text fallback.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
            fallback: FALLBACK_DECODER,
        }
    }

    /// Register a decoder for a tag, returning the one it replaces.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        decoder: StatementDecoder,
    ) -> Option<StatementDecoder> {
        self.decoders.insert(tag.into(), decoder)
    }

    /// Replace the decoder used for unregistered tags.
    pub fn with_fallback(mut self, fallback: StatementDecoder) -> Self {
        self.fallback = fallback;
        self
    }

    /// Decode one payload.
    pub fn decode(&self, type_tag: &str, payload: &[u8]) -> DecodedStatement {
        let decoder = self
            .decoders
            .get(type_tag)
            .copied()
            .unwrap_or(self.fallback);
        run_decoder(decoder, type_tag, payload)
    }

    /// Check if a tag has a registered decoder.
    pub fn has_decoder(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for StatementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementRegistry")
            .field("tags", &self.tags())
            .finish_non_exhaustive()
    }
}
