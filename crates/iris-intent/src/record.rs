use bytes::{Bytes, BytesMut};
use iris_codec::{compact_len, put_bytes, put_compact, put_text, CompactReader};
use serde::Serialize;
use tracing::debug;

use crate::config::DecodeConfig;
use crate::error::{IntentError, Result};
use crate::registry::{decode_statement, StatementRegistry};
use crate::statement::DecodedStatement;

/// Smallest possible record on the wire: two empty length-prefixed fields.
const MIN_RECORD_LEN: usize = 2;

/// One `(type_tag, payload)` entry of an intent collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRecord {
    type_tag: String,
    payload: Bytes,
}

impl IntentRecord {
    /// Create a record.
    pub fn new(type_tag: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            type_tag: type_tag.into(),
            payload: payload.into(),
        }
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn payload(&self) -> &[u8] {
        self.payload.as_ref()
    }

    /// Interpret the payload according to the type tag.
    pub fn decode_statement(&self) -> DecodedStatement {
        decode_statement(&self.type_tag, self.payload())
    }

    /// Encoded size of this record: both fields with their prefixes.
    pub fn wire_size(&self) -> usize {
        field_size(self.type_tag.len()) + field_size(self.payload.len())
    }
}

/// A decoded intent: the record's tag and its interpreted statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedIntent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub statement: DecodedStatement,
}

/// Intent records in encoded order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentCollection {
    records: Vec<IntentRecord>,
}

impl IntentCollection {
    pub fn new(records: Vec<IntentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[IntentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntentRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<IntentRecord> {
        self.records
    }

    /// Decode every statement with the built-in decoders.
    ///
    /// A bad payload yields [`DecodedStatement::Invalid`] for that record
    /// and does not affect the others.
    pub fn decode_statements(&self) -> Vec<DecodedIntent> {
        self.iter()
            .map(|record| DecodedIntent {
                type_tag: record.type_tag.clone(),
                statement: record.decode_statement(),
            })
            .collect()
    }

    /// Decode every statement with an explicit registry.
    pub fn decode_statements_with(&self, registry: &StatementRegistry) -> Vec<DecodedIntent> {
        self.iter()
            .map(|record| DecodedIntent {
                type_tag: record.type_tag.clone(),
                statement: registry.decode(&record.type_tag, record.payload()),
            })
            .collect()
    }

    /// Total encoded size, count prefix included.
    pub fn wire_size(&self) -> usize {
        compact_len(self.records.len() as u64)
            + self.iter().map(IntentRecord::wire_size).sum::<usize>()
    }
}

impl From<Vec<IntentRecord>> for IntentCollection {
    fn from(records: Vec<IntentRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<IntentRecord> for IntentCollection {
    fn from_iter<I: IntoIterator<Item = IntentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IntentCollection {
    type Item = &'a IntentRecord;
    type IntoIter = std::slice::Iter<'a, IntentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for IntentCollection {
    type Item = IntentRecord;
    type IntoIter = std::vec::IntoIter<IntentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Decode the framing of an intent buffer with default limits.
pub fn decode_collection(buf: &[u8]) -> Result<IntentCollection> {
    decode_collection_with_config(buf, &DecodeConfig::default())
}

/// Decode the framing of an intent buffer.
///
/// Wire format:
/// ```text
/// compact(count) ++ count × [ compact(len) ++ tag (UTF-8) ++ compact(len) ++ payload ]
/// ```
///
/// Any framing problem fails the whole buffer; no partial collection is
/// returned. Bytes after the last record are ignored.
pub fn decode_collection_with_config(
    buf: &[u8],
    config: &DecodeConfig,
) -> Result<IntentCollection> {
    let mut reader = CompactReader::new(buf);
    let count = reader
        .read_compact()
        .map_err(IntentError::MalformedCollection)?;

    let max = config.max_records;
    if count > max as u64 {
        return Err(IntentError::TooManyRecords { count, max });
    }
    let count = count as usize;

    let mut records = Vec::with_capacity(count.min(reader.remaining() / MIN_RECORD_LEN));
    for index in 0..count {
        let record = read_record(&mut reader, index, config)?;
        debug!(
            index,
            type_tag = record.type_tag(),
            payload_len = record.payload.len(),
            "decoded intent record"
        );
        records.push(record);
    }

    if !reader.is_empty() {
        debug!(
            trailing = reader.remaining(),
            "ignoring bytes after last intent record"
        );
    }

    Ok(IntentCollection::new(records))
}

fn read_record(
    reader: &mut CompactReader<'_>,
    index: usize,
    config: &DecodeConfig,
) -> Result<IntentRecord> {
    let tag = read_field(reader, index, config)?;
    let type_tag = std::str::from_utf8(tag).map_err(|_| IntentError::InvalidTypeTag { index })?;
    let payload = read_field(reader, index, config)?;
    Ok(IntentRecord::new(type_tag, Bytes::copy_from_slice(payload)))
}

fn read_field<'a>(
    reader: &mut CompactReader<'a>,
    index: usize,
    config: &DecodeConfig,
) -> Result<&'a [u8]> {
    let len = reader
        .read_len()
        .map_err(|err| IntentError::in_record(index, err))?;
    if len > config.max_field_len {
        return Err(IntentError::FieldTooLarge {
            index,
            size: len,
            max: config.max_field_len,
        });
    }
    reader
        .read_slice(len)
        .map_err(|err| IntentError::in_record(index, err))
}

/// Encode a collection into its wire format.
pub fn encode_collection(collection: &IntentCollection) -> Bytes {
    let mut dst = BytesMut::with_capacity(collection.wire_size());
    encode_collection_into(collection, &mut dst);
    dst.freeze()
}

/// Append a collection's wire format to `dst`.
pub fn encode_collection_into(collection: &IntentCollection, dst: &mut BytesMut) {
    put_compact(dst, collection.len() as u64);
    for record in collection {
        put_text(dst, record.type_tag());
        put_bytes(dst, record.payload());
    }
}

fn field_size(len: usize) -> usize {
    compact_len(len as u64) + len
}

#[cfg(test)]
mod tests {
    use bytes::BufMut;

    use super::*;
    use crate::statement::AccountId;

    fn psp22_payload(amount: u128) -> Vec<u8> {
        let mut out = vec![0x42; 32];
        out.extend_from_slice(&amount.to_le_bytes());
        out
    }

    fn sample() -> IntentCollection {
        IntentCollection::from(vec![
            IntentRecord::new("Psp22", psp22_payload(100)),
            IntentRecord::new("Password", vec![0xab, 0xcd]),
            IntentRecord::new("Sr25519", Vec::<u8>::new()),
            IntentRecord::new("Note", b"hello".to_vec()),
        ])
    }

    #[test]
    fn test_empty_collection() {
        let collection = decode_collection(&[0x00]).unwrap();
        assert!(collection.is_empty());
        assert_eq!(encode_collection(&collection).as_ref(), &[0x00]);
    }

    #[test]
    fn test_single_record_wire_layout() {
        let collection =
            IntentCollection::from(vec![IntentRecord::new("Password", vec![0xab, 0xcd])]);
        let wire = encode_collection(&collection);

        let mut expected = vec![0x04, 0x20];
        expected.extend_from_slice(b"Password");
        expected.extend_from_slice(&[0x08, 0xab, 0xcd]);
        assert_eq!(wire.as_ref(), expected.as_slice());
        assert_eq!(wire.len(), collection.wire_size());

        assert_eq!(decode_collection(&wire).unwrap(), collection);
    }

    #[test]
    fn test_order_is_preserved() {
        let collection = sample();
        let decoded = decode_collection(&encode_collection(&collection)).unwrap();

        let tags: Vec<&str> = decoded.iter().map(IntentRecord::type_tag).collect();
        assert_eq!(tags, vec!["Psp22", "Password", "Sr25519", "Note"]);
        assert_eq!(decoded, collection);
    }

    #[test]
    fn test_decode_statements() {
        let intents = sample().decode_statements();
        assert_eq!(intents.len(), 4);
        assert_eq!(
            intents[0].statement,
            DecodedStatement::AccountBalance {
                account: AccountId([0x42; 32]),
                amount: 100,
            }
        );
        assert_eq!(intents[1].statement, DecodedStatement::HexBytes("abcd".into()));
        assert_eq!(intents[2].statement, DecodedStatement::Empty);
        assert_eq!(intents[3].statement, DecodedStatement::PlainText("hello".into()));
        assert_eq!(intents[3].type_tag, "Note");
    }

    #[test]
    fn test_bad_payload_does_not_fail_siblings() {
        let collection = IntentCollection::from(vec![
            IntentRecord::new("Psp22", vec![0u8; 47]),
            IntentRecord::new("Password", vec![0xab, 0xcd]),
        ]);
        let wire = encode_collection(&collection);

        let intents = crate::decode_intents(&wire).unwrap();
        assert_eq!(intents.len(), 2);
        assert_eq!(
            intents[0].statement,
            DecodedStatement::Invalid("bad psp22 payload length".into())
        );
        assert_eq!(intents[1].statement, DecodedStatement::HexBytes("abcd".into()));
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        assert!(matches!(
            decode_collection(&[]),
            Err(IntentError::MalformedCollection(_))
        ));
    }

    #[test]
    fn test_unreadable_count_is_malformed() {
        assert!(matches!(
            decode_collection(&[0x01]),
            Err(IntentError::MalformedCollection(_))
        ));
    }

    #[test]
    fn test_every_truncation_is_a_framing_error() {
        let wire = encode_collection(&sample());
        for cut in 1..wire.len() {
            let result = decode_collection(&wire[..cut]);
            assert!(
                matches!(result, Err(IntentError::TruncatedRecord { .. })),
                "cut at {cut}: {result:?}"
            );
        }
    }

    #[test]
    fn test_count_larger_than_records() {
        let mut wire = BytesMut::new();
        put_compact(&mut wire, 3);
        put_text(&mut wire, "Note");
        put_bytes(&mut wire, b"a");
        let err = decode_collection(&wire).unwrap_err();
        assert!(matches!(err, IntentError::TruncatedRecord { index: 1, .. }));
    }

    #[test]
    fn test_invalid_type_tag() {
        let mut wire = BytesMut::new();
        put_compact(&mut wire, 1);
        put_bytes(&mut wire, &[0xff, 0xfe]);
        put_bytes(&mut wire, b"x");
        assert_eq!(
            decode_collection(&wire),
            Err(IntentError::InvalidTypeTag { index: 0 })
        );
    }

    #[test]
    fn test_non_canonical_field_prefix() {
        let mut wire = BytesMut::new();
        put_compact(&mut wire, 1);
        // Tag length 1 in the two-byte form.
        wire.put_slice(&[0x05, 0x00, b'X']);
        put_bytes(&mut wire, b"");
        assert!(matches!(
            decode_collection(&wire),
            Err(IntentError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_too_many_records() {
        let config = DecodeConfig {
            max_records: 2,
            ..DecodeConfig::default()
        };
        let wire = encode_collection(&sample());
        let err = decode_collection_with_config(&wire, &config).unwrap_err();
        assert_eq!(err, IntentError::TooManyRecords { count: 4, max: 2 });
        assert!(err.is_limit());
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        // Declares u32::MAX records but carries none.
        let wire = [0x03, 0xff, 0xff, 0xff, 0xff];
        let config = DecodeConfig {
            max_records: usize::MAX,
            ..DecodeConfig::default()
        };
        assert!(matches!(
            decode_collection_with_config(&wire, &config),
            Err(IntentError::TruncatedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_field_too_large() {
        let config = DecodeConfig {
            max_field_len: 4,
            ..DecodeConfig::default()
        };
        let wire = encode_collection(&sample());
        let err = decode_collection_with_config(&wire, &config).unwrap_err();
        assert_eq!(
            err,
            IntentError::FieldTooLarge {
                index: 0,
                size: 5,
                max: 4
            }
        );
        assert!(err.is_limit());
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut wire = BytesMut::from(encode_collection(&sample()).as_ref());
        wire.put_slice(&[0xde, 0xad]);
        assert_eq!(decode_collection(&wire).unwrap(), sample());
    }

    #[test]
    fn test_decode_statements_with_registry() {
        fn reversed(payload: &[u8]) -> DecodedStatement {
            let mut bytes = payload.to_vec();
            bytes.reverse();
            DecodedStatement::PlainText(String::from_utf8_lossy(&bytes).into_owned())
        }

        let mut registry = StatementRegistry::new();
        registry.register("Note", reversed);
        let intents = sample().decode_statements_with(&registry);
        assert_eq!(intents[3].statement, DecodedStatement::PlainText("olleh".into()));
        assert_eq!(intents[2].statement, DecodedStatement::Empty);
    }

    #[test]
    fn test_decoding_across_threads() {
        let wire = encode_collection(&sample());
        let collection = decode_collection(&wire).unwrap();

        let statements: Vec<DecodedStatement> = std::thread::scope(|scope| {
            let handles: Vec<_> = collection
                .iter()
                .map(|record| scope.spawn(move || record.decode_statement()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        let sequential: Vec<DecodedStatement> = collection
            .decode_statements()
            .into_iter()
            .map(|intent| intent.statement)
            .collect();
        assert_eq!(statements, sequential);
    }

    #[test]
    fn test_json_output() {
        let intents = sample().decode_statements();
        let json = serde_json::to_value(&intents[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Password",
                "statement": { "kind": "hex_bytes", "value": "abcd" }
            })
        );
    }
}
