//! Condition-side modifier application: typed conversion of a condition's
//! literal before it is compared against live file values.
//!
//! Lists and sets are transformed elementwise; a list becomes a set of typed
//! scalars in the process.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDateTime};

use super::error::{TransformError, TransformResult};
use super::format::UNIX_LAYOUT;
use super::hash;
use crate::query::{Attribute, Modifier, Scalar, Value};

/// Applies one modifier to a condition's comparison value.
pub fn apply(attribute: Attribute, modifier: &Modifier, value: Value) -> TransformResult<Value> {
    match value {
        Value::Scalar(scalar) => Ok(Value::Scalar(apply_scalar(attribute, modifier, scalar)?)),
        Value::List(items) => {
            let set = items
                .into_iter()
                .map(|item| apply_scalar(attribute, modifier, Scalar::Str(item)))
                .collect::<TransformResult<HashSet<Scalar>>>()?;
            Ok(Value::Set(set))
        }
        Value::Set(set) => {
            let set = set
                .into_iter()
                .map(|scalar| apply_scalar(attribute, modifier, scalar))
                .collect::<TransformResult<HashSet<Scalar>>>()?;
            Ok(Value::Set(set))
        }
    }
}

fn apply_scalar(
    attribute: Attribute,
    modifier: &Modifier,
    value: Scalar,
) -> TransformResult<Scalar> {
    match modifier.name.as_str() {
        "FORMAT" => format(attribute, &modifier.arguments, value),
        "UPPER" => match value {
            Scalar::Str(s) => Ok(Scalar::Str(s.to_uppercase())),
            _ => Err(not_implemented(modifier, attribute)),
        },
        "LOWER" => match value {
            Scalar::Str(s) => Ok(Scalar::Str(s.to_lowercase())),
            _ => Err(not_implemented(modifier, attribute)),
        },
        // A hash modifier on a hash condition only names the algorithm; the
        // comparator reads it from the condition's modifier list.
        name if hash::find_hasher(name).is_some() && attribute == Attribute::Hash => Ok(value),
        _ => Err(not_implemented(modifier, attribute)),
    }
}

fn not_implemented(modifier: &Modifier, attribute: Attribute) -> TransformError {
    TransformError::NotImplemented {
        name: modifier.name.clone(),
        attribute,
    }
}

fn format(attribute: Attribute, arguments: &[String], value: Scalar) -> TransformResult<Scalar> {
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
            let scale: f64 = match arg.to_uppercase().as_str() {
                "B" => 1.0,
                "KB" => (1u64 << 10) as f64,
                "MB" => (1u64 << 20) as f64,
                "GB" => (1u64 << 30) as f64,
                _ => return Err(unsupported()),
            };
            let number = match value {
                Scalar::Int(n) => n as f64,
                Scalar::Str(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| TransformError::InvalidNumber { raw })?,
                Scalar::Time(_) => return Err(unsupported()),
            };
            Ok(Scalar::Int((number * scale) as i64))
        }
        Attribute::Time => {
            let raw = match value {
                Scalar::Str(s) => s,
                // Already typed, e.g. collected from a subquery.
                typed @ Scalar::Time(_) => return Ok(typed),
                _ => return Err(unsupported()),
            };
            let time = match arg.to_uppercase().as_str() {
                "ISO" => DateTime::parse_from_rfc3339(&raw)
                    .ok()
                    .map(|t| t.with_timezone(&Local)),
                "UNIX" => parse_local(&raw, UNIX_LAYOUT),
                _ if arg.is_empty() => return Err(unsupported()),
                _ => parse_local(&raw, arg),
            };
            match time {
                Some(t) => Ok(Scalar::Time(t)),
                None => Err(TransformError::InvalidTime { raw }),
            }
        }
        Attribute::Mode | Attribute::Hash => Err(unsupported()),
    }
}

/// Parses a wall-clock timestamp in the local timezone.
pub(crate) fn parse_local(raw: &str, layout: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(raw, layout).ok()?;
    naive.and_local_timezone(Local).earliest()
}
