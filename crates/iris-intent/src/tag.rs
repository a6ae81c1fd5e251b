//! Known intent type tags.
//!
//! Tags arrive as free text and are matched case-sensitively. A tag without
//! an entry in [`BUILTIN_DECODERS`](crate::registry::BUILTIN_DECODERS) falls
//! back to plain-text decoding.

/// Minimum PSP22 token balance held by an account.
pub const PSP22: &str = "Psp22";

/// Knowledge of a password; the statement is its SHA-256 multihash.
pub const PASSWORD: &str = "Password";

/// Sr25519 signature ownership; carries no statement.
pub const SR25519: &str = "Sr25519";
