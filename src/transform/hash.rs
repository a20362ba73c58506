//! Content hashing for the `hash` attribute and hash modifiers.

use std::fs;
use std::io;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::walk::FileInfo;

/// Hex digits kept when no explicit length is requested.
pub const DEFAULT_HASH_LENGTH: usize = 7;

/// A registered hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    Sha1,
    Sha256,
    Sha512,
}

impl HashKind {
    fn digest(&self, bytes: &[u8]) -> String {
        match self {
            HashKind::Sha1 => format!("{:x}", Sha1::digest(bytes)),
            HashKind::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            HashKind::Sha512 => format!("{:x}", Sha512::digest(bytes)),
        }
    }

    /// Length of the hex-encoded digest.
    fn hex_len(&self) -> usize {
        match self {
            HashKind::Sha1 => 40,
            HashKind::Sha256 => 64,
            HashKind::Sha512 => 128,
        }
    }
}

/// Looks up a hash algorithm by modifier name, case-insensitively.
pub fn find_hasher(name: &str) -> Option<HashKind> {
    match name.to_uppercase().as_str() {
        "SHA1" => Some(HashKind::Sha1),
        "SHA256" => Some(HashKind::Sha256),
        "SHA512" => Some(HashKind::Sha512),
        _ => None,
    }
}

/// Hex digest of the file's contents. Directories and symlinks that cannot
/// be resolved produce a digest-width run of dashes instead of an error;
/// read failures on regular files do propagate.
pub fn compute_hash(info: &FileInfo, kind: HashKind) -> io::Result<String> {
    let fallback = "-".repeat(kind.hex_len());

    let mut path = info.path.clone();
    let mut is_dir = info.is_dir();
    if info.metadata.file_type().is_symlink() {
        let resolved = match fs::canonicalize(&path) {
            Ok(resolved) => resolved,
            Err(_) => return Ok(fallback),
        };
        match fs::metadata(&resolved) {
            Ok(metadata) => {
                is_dir = metadata.is_dir();
                path = resolved;
            }
            Err(_) => return Ok(fallback),
        }
    }

    if is_dir {
        return Ok(fallback);
    }

    let bytes = fs::read(&path)?;
    Ok(kind.digest(&bytes))
}

/// First `len` characters of `value`; the whole string when it is already
/// shorter.
pub fn truncate(value: &str, len: usize) -> &str {
    if value.len() < len {
        value
    } else {
        &value[..len]
    }
}
