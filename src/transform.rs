//! Value transformations (modifiers) and content hashing.
//!
//! Modifiers run in two directions. `format` shapes an attribute's output
//! value for display (`FORMAT`, `UPPER`, `FULLPATH`, hash digests).
//! `parse` types a condition's literal before comparison (`FORMAT(size, mb)`
//! turns `"1.5"` into bytes, `FORMAT(time, iso)` parses a timestamp).

pub mod error;
pub mod format;
pub mod hash;
pub mod parse;

pub use error::{TransformError, TransformResult};
pub use hash::{compute_hash, find_hasher, truncate, HashKind, DEFAULT_HASH_LENGTH};
