use iris_codec::CompactError;

/// Framing errors: the buffer as a whole cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    /// The record count prefix could not be read.
    #[error("malformed collection: {0}")]
    MalformedCollection(#[source] CompactError),

    /// The buffer ended inside a record.
    #[error("record {index} is truncated: {source}")]
    TruncatedRecord { index: usize, source: CompactError },

    /// A field prefix inside a record is not a valid compact integer.
    #[error("record {index} is malformed: {source}")]
    MalformedRecord { index: usize, source: CompactError },

    /// A record's type tag is not valid UTF-8.
    #[error("record {index} has a type tag that is not valid UTF-8")]
    InvalidTypeTag { index: usize },

    /// The collection declares more records than allowed.
    #[error("collection declares {count} records (max {max})")]
    TooManyRecords { count: u64, max: usize },

    /// A tag or payload declares a length above the configured limit.
    #[error("record {index} field too large ({size} bytes, max {max})")]
    FieldTooLarge { index: usize, size: usize, max: usize },
}

impl IntentError {
    /// True when a configured [`DecodeConfig`](crate::DecodeConfig) limit
    /// rejected the buffer rather than its structure.
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::TooManyRecords { .. } | Self::FieldTooLarge { .. })
    }

    pub(crate) fn in_record(index: usize, source: CompactError) -> Self {
        match source {
            CompactError::TruncatedInput { .. } => Self::TruncatedRecord { index, source },
            CompactError::InvalidUtf8 => Self::InvalidTypeTag { index },
            source => Self::MalformedRecord { index, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, IntentError>;

/// Errors raised while turning an intent expression into records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// A clause has no opening parenthesis.
    #[error("clause {clause}: expected '(' after the intent type")]
    MissingOpenParen { clause: usize },

    /// A clause never closes its argument.
    #[error("clause {clause}: unbalanced parentheses")]
    UnbalancedParens { clause: usize },

    /// A clause has no intent type before '('.
    #[error("clause {clause}: missing intent type")]
    EmptyTag { clause: usize },

    /// Text follows the closing parenthesis of a clause.
    #[error("clause {clause}: unexpected input after ')': {rest:?}")]
    TrailingInput { clause: usize, rest: String },

    /// The argument is not valid for the intent type.
    #[error("invalid {tag} argument: {reason}")]
    InvalidArgument { tag: String, reason: String },
}
