/// Errors that can occur while reading compact prefixes and prefixed fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompactError {
    /// Fewer bytes remain than the encoding declares.
    #[error("truncated input ({needed} bytes needed, {available} available)")]
    TruncatedInput { needed: usize, available: usize },

    /// The value fits a narrower width class than the one used.
    #[error("non-canonical compact encoding ({value} encoded in {width} bytes)")]
    NonCanonical { value: u64, width: usize },

    /// The big-integer form declares more value bytes than a `u64` holds.
    #[error("compact integer too wide ({width} bytes, max 9)")]
    Overflow { width: usize },

    /// A text field does not hold valid UTF-8.
    #[error("text field is not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, CompactError>;
