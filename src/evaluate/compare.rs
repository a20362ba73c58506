//! Comparison semantics for each file attribute.

use chrono::{DateTime, Local};
use regex::Regex;

use super::error::{EvaluateError, EvaluateResult};
use crate::query::{Attribute, Condition, Scalar, Value};
use crate::tokenizer::TokenKind;
use crate::transform::parse::parse_local;
use crate::transform::{compute_hash, find_hasher, truncate};
use crate::walk::FileInfo;

/// Layout of bare time literals, e.g. `Jan 02 2017 15 04`.
const TIME_LITERAL_LAYOUT: &str = "%b %d %Y %H %M";

/// Compares the file named by `info` against a single condition.
///
/// The condition's value must already have its attribute modifiers applied.
/// Negation is left to the caller.
pub fn evaluate(condition: &Condition, info: &FileInfo) -> EvaluateResult<bool> {
    match condition.attribute {
        Attribute::Name => evaluate_name(condition, info),
        Attribute::Size => evaluate_size(condition, info),
        Attribute::Time => evaluate_time(condition, info),
        Attribute::Mode => evaluate_mode(condition, info),
        Attribute::Hash => evaluate_hash(condition, info),
    }
}

fn evaluate_name(condition: &Condition, info: &FileInfo) -> EvaluateResult<bool> {
    cmp_alpha(
        condition.attribute,
        condition.operator,
        &info.file_name,
        &condition.value,
    )
}

fn evaluate_size(condition: &Condition, info: &FileInfo) -> EvaluateResult<bool> {
    let size = info.size();
    if condition.operator == TokenKind::In {
        return Ok(match &condition.value {
            Value::Set(set) => set.contains(&Scalar::Int(size)),
            Value::List(items) => items
                .iter()
                .any(|item| parse_size(item).map_or(false, |target| target == size)),
            Value::Scalar(Scalar::Str(raw)) => raw
                .split(',')
                .any(|item| parse_size(item).map_or(false, |target| target == size)),
            Value::Scalar(Scalar::Int(target)) => *target == size,
            _ => false,
        });
    }

    let target = match &condition.value {
        Value::Scalar(Scalar::Int(target)) => *target,
        Value::Scalar(Scalar::Str(raw)) => parse_size(raw)?,
        other => return Err(unsupported_type(condition.attribute, other)),
    };
    cmp_ordered(condition.attribute, condition.operator, size, target)
}

fn evaluate_time(condition: &Condition, info: &FileInfo) -> EvaluateResult<bool> {
    let modified = info.modified()?;
    if condition.operator == TokenKind::In {
        return Ok(match &condition.value {
            Value::Set(set) => set.contains(&Scalar::Time(modified)),
            Value::List(items) => items
                .iter()
                .any(|item| parse_time_literal(item).map_or(false, |target| target == modified)),
            Value::Scalar(Scalar::Str(raw)) => raw
                .split(',')
                .any(|item| parse_time_literal(item).map_or(false, |target| target == modified)),
            Value::Scalar(Scalar::Time(target)) => *target == modified,
            _ => false,
        });
    }

    let target = match &condition.value {
        Value::Scalar(Scalar::Time(target)) => *target,
        Value::Scalar(Scalar::Str(raw)) => parse_time_literal(raw)?,
        other => return Err(unsupported_type(condition.attribute, other)),
    };
    cmp_ordered(condition.attribute, condition.operator, modified, target)
}

fn evaluate_mode(condition: &Condition, info: &FileInfo) -> EvaluateResult<bool> {
    if condition.operator != TokenKind::Is {
        return Err(unsupported_operator(condition.attribute, condition.operator));
    }
    let target = match &condition.value {
        Value::Scalar(Scalar::Str(raw)) => raw,
        other => return Err(unsupported_type(condition.attribute, other)),
    };
    Ok(match target.to_uppercase().as_str() {
        "DIR" => info.is_dir(),
        "REG" => info.is_file(),
        _ => false,
    })
}

fn evaluate_hash(condition: &Condition, info: &FileInfo) -> EvaluateResult<bool> {
    let algorithm = condition
        .attribute_modifiers
        .first()
        .map(|modifier| modifier.name.as_str())
        .unwrap_or("SHA1");
    let kind = find_hasher(algorithm).ok_or_else(|| EvaluateError::UnknownHashAlgorithm {
        name: algorithm.to_string(),
    })?;

    let target = match &condition.value {
        Value::Scalar(Scalar::Str(raw)) => raw.as_str(),
        other => return Err(unsupported_type(condition.attribute, other)),
    };

    // The digest is truncated to the literal's length, so a prefix of the
    // full digest matches.
    let digest = compute_hash(info, kind)?;
    let digest = truncate(&digest, target.len());
    match condition.operator {
        TokenKind::Equals => Ok(digest == target),
        TokenKind::NotEquals => Ok(digest != target),
        operator => Err(unsupported_operator(condition.attribute, operator)),
    }
}

fn cmp_alpha(
    attribute: Attribute,
    operator: TokenKind,
    name: &str,
    value: &Value,
) -> EvaluateResult<bool> {
    if operator == TokenKind::In {
        return Ok(match value {
            Value::Set(set) => set.contains(&Scalar::Str(name.to_string())),
            Value::List(items) => items.iter().any(|item| item.as_str() == name),
            Value::Scalar(Scalar::Str(raw)) => raw.split(',').any(|item| item == name),
            _ => false,
        });
    }

    let target = match value {
        Value::Scalar(Scalar::Str(raw)) => raw.as_str(),
        _ => return Err(unsupported_type(attribute, value)),
    };
    match operator {
        TokenKind::Equals => Ok(name == target),
        TokenKind::NotEquals => Ok(name != target),
        TokenKind::Like => Ok(like_match(name, target)),
        TokenKind::RLike => {
            let pattern = Regex::new(target).map_err(|source| EvaluateError::InvalidRegex {
                pattern: target.to_string(),
                source,
            })?;
            Ok(pattern.is_match(name))
        }
        _ => Err(unsupported_operator(attribute, operator)),
    }
}

fn cmp_ordered<T: PartialOrd>(
    attribute: Attribute,
    operator: TokenKind,
    left: T,
    right: T,
) -> EvaluateResult<bool> {
    match operator {
        TokenKind::Equals => Ok(left == right),
        TokenKind::NotEquals => Ok(left != right),
        TokenKind::GreaterThanEquals => Ok(left >= right),
        TokenKind::GreaterThan => Ok(left > right),
        TokenKind::LessThanEquals => Ok(left <= right),
        TokenKind::LessThan => Ok(left < right),
        _ => Err(unsupported_operator(attribute, operator)),
    }
}

/// `LIKE` pattern match. `%` marks the unanchored side; a pattern without
/// `%` matches as a substring.
fn like_match(input: &str, pattern: &str) -> bool {
    let starts = pattern.starts_with('%');
    let ends = pattern.ends_with('%');
    if starts && ends {
        if pattern.len() < 2 {
            return true;
        }
        input.contains(&pattern[1..pattern.len() - 1])
    } else if starts {
        input.ends_with(&pattern[1..])
    } else if ends {
        input.starts_with(&pattern[..pattern.len() - 1])
    } else {
        input.contains(pattern)
    }
}

/// Parses a size literal. A trailing `kb`, `mb`, or `gb` scales the value by
/// the matching power of 1024; fractions truncate toward zero after scaling.
fn parse_size(raw: &str) -> EvaluateResult<i64> {
    let lowered = raw.to_lowercase();
    let (number, scale) = if let Some(prefix) = lowered.strip_suffix("kb") {
        (prefix, 1u64 << 10)
    } else if let Some(prefix) = lowered.strip_suffix("mb") {
        (prefix, 1u64 << 20)
    } else if let Some(prefix) = lowered.strip_suffix("gb") {
        (prefix, 1u64 << 30)
    } else {
        (lowered.as_str(), 1)
    };
    let number = number.parse::<f64>().map_err(|_| EvaluateError::InvalidSize {
        raw: raw.to_string(),
    })?;
    Ok((number * scale as f64) as i64)
}

fn parse_time_literal(raw: &str) -> EvaluateResult<DateTime<Local>> {
    parse_local(raw, TIME_LITERAL_LAYOUT).ok_or_else(|| EvaluateError::InvalidTime {
        raw: raw.to_string(),
    })
}

fn unsupported_operator(attribute: Attribute, operator: TokenKind) -> EvaluateError {
    EvaluateError::UnsupportedOperator {
        attribute,
        operator,
    }
}

fn unsupported_type(attribute: Attribute, value: &Value) -> EvaluateError {
    EvaluateError::UnsupportedType {
        attribute,
        value: value.to_string(),
    }
}
