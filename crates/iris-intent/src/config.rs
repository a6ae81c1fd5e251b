/// Default cap on the number of records in one collection.
pub const DEFAULT_MAX_RECORDS: usize = 64 * 1024;

/// Default cap on a single tag or payload field: 16 MiB.
pub const DEFAULT_MAX_FIELD_LEN: usize = 16 * 1024 * 1024;

/// Limits applied while decoding collection framing.
///
/// Limits are checked against declared lengths before anything is
/// allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum number of records a collection may declare.
    pub max_records: usize,
    /// Maximum length of a single type tag or payload.
    pub max_field_len: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}
