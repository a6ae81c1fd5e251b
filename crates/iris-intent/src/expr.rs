//! Intent expressions.
//!
//! An expression lists the intents guarding a document as `&&`-joined
//! clauses of the form `Type(argument)`:
//!
//! ```text
//! Password(correct horse) && Psp22(0x<64 hex digits>, 100)
//! ```
//!
//! Arguments may contain balanced parentheses. Each clause becomes one
//! [`IntentRecord`] whose payload is built by the tag's statement builder.

use bytes::BytesMut;
use iris_codec::put_bytes;
use sha2::{Digest, Sha256};

use crate::error::ExpressionError;
use crate::record::{IntentCollection, IntentRecord};
use crate::statement::{ACCOUNT_ID_LEN, PSP22_TUPLE_LEN};
use crate::tag::{PASSWORD, PSP22, SR25519};

/// Separator between clauses (logical AND).
pub const CLAUSE_DELIMITER: &str = "&&";

/// Multihash code for SHA2-256.
pub const SHA2_256_MULTIHASH_CODE: u8 = 0x12;

/// Builds a statement payload from a clause argument; errors are reasons.
pub type StatementBuilder = fn(&str) -> Result<Vec<u8>, String>;

/// Statement builders for the known intent types.
pub const BUILTIN_BUILDERS: &[(&str, StatementBuilder)] = &[
    (PSP22, build_psp22),
    (PASSWORD, build_password),
    (SR25519, build_sr25519),
];

/// Builder used for tags with no entry.
pub const FALLBACK_BUILDER: StatementBuilder = build_text;

/// Split an expression into `(tag, argument)` pairs.
pub fn parse_expression(input: &str) -> Result<Vec<(&str, &str)>, ExpressionError> {
    input
        .split(CLAUSE_DELIMITER)
        .enumerate()
        .map(|(clause, text)| parse_clause(clause, text.trim()))
        .collect()
}

fn parse_clause(clause: usize, input: &str) -> Result<(&str, &str), ExpressionError> {
    let open = input
        .find('(')
        .ok_or(ExpressionError::MissingOpenParen { clause })?;
    let tag = input[..open].trim();
    if tag.is_empty() {
        return Err(ExpressionError::EmptyTag { clause });
    }

    let body = &input[open + 1..];
    let mut depth = 1usize;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let rest = body[i + 1..].trim();
                    if !rest.is_empty() {
                        return Err(ExpressionError::TrailingInput {
                            clause,
                            rest: rest.to_string(),
                        });
                    }
                    return Ok((tag, &body[..i]));
                }
            }
            _ => {}
        }
    }
    Err(ExpressionError::UnbalancedParens { clause })
}

/// Build the statement payload for one clause.
pub fn build_statement(tag: &str, argument: &str) -> Result<Vec<u8>, ExpressionError> {
    let builder = BUILTIN_BUILDERS
        .iter()
        .find(|(known, _)| *known == tag)
        .map_or(FALLBACK_BUILDER, |(_, builder)| *builder);
    builder(argument).map_err(|reason| ExpressionError::InvalidArgument {
        tag: tag.to_string(),
        reason,
    })
}

/// Build a collection from an expression, one record per clause.
pub fn build_collection(input: &str) -> Result<IntentCollection, ExpressionError> {
    parse_expression(input)?
        .into_iter()
        .map(|(tag, argument)| -> Result<IntentRecord, ExpressionError> {
            let statement = build_statement(tag, argument)?;
            Ok(IntentRecord::new(tag, statement))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(IntentCollection::new)
}

/// `Password(secret)`: the SHA2-256 multihash of the password.
fn build_password(argument: &str) -> Result<Vec<u8>, String> {
    let digest = Sha256::digest(argument.as_bytes());
    let mut out = Vec::with_capacity(2 + digest.len());
    out.push(SHA2_256_MULTIHASH_CODE);
    out.push(digest.len() as u8);
    out.extend_from_slice(&digest);
    Ok(out)
}

/// `Psp22(account, min_balance)`: account bytes ++ balance (LE).
fn build_psp22(argument: &str) -> Result<Vec<u8>, String> {
    let (account, balance) = argument
        .split_once(',')
        .ok_or_else(|| "expected \"<account>, <min_balance>\"".to_string())?;

    let account = account.trim();
    let account = account.strip_prefix("0x").unwrap_or(account);
    let account = hex::decode(account).map_err(|err| format!("account is not hex: {err}"))?;
    if account.len() != ACCOUNT_ID_LEN {
        return Err(format!(
            "account must be {ACCOUNT_ID_LEN} bytes, got {}",
            account.len()
        ));
    }

    let balance: u128 = balance
        .trim()
        .parse()
        .map_err(|err| format!("invalid min_balance: {err}"))?;

    let mut out = Vec::with_capacity(PSP22_TUPLE_LEN);
    out.extend_from_slice(&account);
    out.extend_from_slice(&balance.to_le_bytes());
    Ok(out)
}

fn build_sr25519(_argument: &str) -> Result<Vec<u8>, String> {
    Ok(Vec::new())
}

/// Unknown types carry their argument as length-prefixed text.
fn build_text(argument: &str) -> Result<Vec<u8>, String> {
    let mut out = BytesMut::with_capacity(argument.len() + 1);
    put_bytes(&mut out, argument.as_bytes());
    Ok(out.to_vec())
}
