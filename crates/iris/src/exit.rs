use std::fmt;
use std::io;

use iris_intent::{ExpressionError, IntentError};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Framing errors mean the buffer itself is unusable. Limit hits are
/// reported separately since raising the limit may be enough.
pub fn intent_error(err: IntentError) -> CliError {
    if err.is_limit() {
        return CliError::new(
            DATA_INVALID,
            format!("decode limit exceeded: {err} (see --max-records, --max-field-len)"),
        );
    }
    CliError::new(DATA_INVALID, format!("decode failed: {err}"))
}

pub fn expression_error(context: &str, err: ExpressionError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use iris_codec::CompactError;

    use super::*;

    #[test]
    fn framing_errors_map_to_data_invalid() {
        let err = intent_error(IntentError::TruncatedRecord {
            index: 2,
            source: CompactError::TruncatedInput {
                needed: 4,
                available: 1,
            },
        });
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode failed: record 2 is truncated"));
    }

    #[test]
    fn limit_errors_are_reported_as_limits() {
        let too_many = intent_error(IntentError::TooManyRecords { count: 9, max: 2 });
        assert_eq!(too_many.code, DATA_INVALID);
        assert!(too_many
            .message
            .starts_with("decode limit exceeded: collection declares 9 records"));

        let too_large = intent_error(IntentError::FieldTooLarge {
            index: 0,
            size: 64,
            max: 8,
        });
        assert!(too_large.message.contains("--max-field-len"));
        assert!(!too_large.message.starts_with("decode failed"));
    }

    #[test]
    fn io_errors_map_by_kind() {
        let denied = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code, PERMISSION_DENIED);
        let missing = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, FAILURE);
    }
}
