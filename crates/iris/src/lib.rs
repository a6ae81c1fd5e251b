//! Decode and build intent collections stored by the iris document registry.
//!
//! # Crate Structure
//!
//! - [`codec`]: SCALE compact length prefixes and field cursors
//! - [`intent`]: Collection framing, per-type statement decoding, and
//!   intent expressions
//!
//! The `iris` binary (behind the `cli` feature) decodes buffers from the
//! command line and renders them as tables or JSON.

/// Re-export codec types.
pub mod codec {
    pub use iris_codec::*;
}

/// Re-export intent types.
pub mod intent {
    pub use iris_intent::*;
}
