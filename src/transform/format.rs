//! Output-side modifier application: turns an attribute's default value into
//! what the row should display.

use chrono::{DateTime, Local};

use super::error::{TransformError, TransformResult};
use super::hash::{self, DEFAULT_HASH_LENGTH};
use crate::query::{Attribute, Modifier, Scalar};
use crate::walk::FileInfo;

/// The ctime-style `UNIX` format argument.
pub(super) const UNIX_LAYOUT: &str = "%a %b %e %H:%M:%S %Z %Y";

/// The value an attribute renders as when no modifier touches it.
pub fn default_value(attribute: Attribute, info: &FileInfo) -> TransformResult<Scalar> {
    match attribute {
        Attribute::Mode => Ok(Scalar::Str(info.mode_string())),
        Attribute::Name => Ok(Scalar::Str(info.file_name.clone())),
        Attribute::Size => Ok(Scalar::Int(info.size())),
        Attribute::Time => Ok(Scalar::Time(info.modified()?)),
        Attribute::Hash => {
            let digest = hash::compute_hash(info, hash::HashKind::Sha1)?;
            Ok(Scalar::Str(
                hash::truncate(&digest, DEFAULT_HASH_LENGTH).to_string(),
            ))
        }
    }
}

/// Applies one modifier to an attribute's current output value.
pub fn apply(
    info: &FileInfo,
    attribute: Attribute,
    modifier: &Modifier,
    value: Scalar,
) -> TransformResult<Scalar> {
    match modifier.name.as_str() {
        "FORMAT" => format(info, attribute, &modifier.arguments, value),
        "UPPER" => match value {
            Scalar::Str(s) => Ok(Scalar::Str(s.to_uppercase())),
            _ => Err(not_implemented(modifier, attribute)),
        },
        "LOWER" => match value {
            Scalar::Str(s) => Ok(Scalar::Str(s.to_lowercase())),
            _ => Err(not_implemented(modifier, attribute)),
        },
        "FULLPATH" => match attribute {
            Attribute::Name => Ok(Scalar::Str(info.path.to_string_lossy().into_owned())),
            _ => Err(not_implemented(modifier, attribute)),
        },
        "SHORTPATH" => match attribute {
            Attribute::Name => Ok(Scalar::Str(info.file_name.clone())),
            _ => Err(not_implemented(modifier, attribute)),
        },
        name => match hash::find_hasher(name) {
            Some(kind) => hashed(info, modifier, kind),
            None => Err(not_implemented(modifier, attribute)),
        },
    }
}

fn not_implemented(modifier: &Modifier, attribute: Attribute) -> TransformError {
    TransformError::NotImplemented {
        name: modifier.name.clone(),
        attribute,
    }
}

/// `FORMAT(attr, arg)`: reformat a value in an attribute-specific way.
fn format(
    info: &FileInfo,
    attribute: Attribute,
    arguments: &[String],
    value: Scalar,
) -> TransformResult<Scalar> {
    let arg = arguments.first().map(String::as_str).unwrap_or("");
    let unsupported = || TransformError::UnsupportedFormat {
        format: arg.to_string(),
        attribute,
    };

    match attribute {
        Attribute::Name => {
            let name = match value {
                Scalar::Str(s) => s,
                _ => return Err(unsupported()),
            };
            match arg.to_uppercase().as_str() {
                "UPPER" => Ok(Scalar::Str(name.to_uppercase())),
                "LOWER" => Ok(Scalar::Str(name.to_lowercase())),
                _ => Err(unsupported()),
            }
        }
        Attribute::Size => {
            let size = match value {
                Scalar::Int(n) => n,
                _ => return Err(unsupported()),
            };
            let formatted = match arg.to_uppercase().as_str() {
                "KB" => format!("{:.6}kb", size as f64 / (1u64 << 10) as f64),
                "MB" => format!("{:.6}mb", size as f64 / (1u64 << 20) as f64),
                "GB" => format!("{:.6}gb", size as f64 / (1u64 << 30) as f64),
                _ => return Err(unsupported()),
            };
            Ok(Scalar::Str(formatted))
        }
        Attribute::Time => {
            let time: DateTime<Local> = match value {
                Scalar::Time(t) => t,
                _ => info.modified()?,
            };
            let formatted = match arg.to_uppercase().as_str() {
                "ISO" => time.to_rfc3339(),
                "UNIX" => time.format(UNIX_LAYOUT).to_string(),
                _ if arg.is_empty() => return Err(unsupported()),
                _ => time.format(arg).to_string(),
            };
            Ok(Scalar::Str(formatted))
        }
        Attribute::Mode | Attribute::Hash => Err(unsupported()),
    }
}

/// A hash modifier: digest the file with the named algorithm, then truncate.
/// The optional argument is a digit count, or `FULL` for the whole digest;
/// absent means 7. Works against any attribute since the digest only
/// depends on the file.
fn hashed(info: &FileInfo, modifier: &Modifier, kind: hash::HashKind) -> TransformResult<Scalar> {
    let digest = hash::compute_hash(info, kind)?;
    let length = match modifier.arguments.first().map(String::as_str) {
        None | Some("") => Some(DEFAULT_HASH_LENGTH),
        Some(arg) if arg.eq_ignore_ascii_case("FULL") => None,
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                return Err(TransformError::InvalidNumber {
                    raw: arg.to_string(),
                })
            }
        },
    };
    Ok(Scalar::Str(match length {
        Some(n) => hash::truncate(&digest, n).to_string(),
        None => digest,
    }))
}
