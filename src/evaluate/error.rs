//! Error types for condition evaluation.

use thiserror::Error;

use crate::query::Attribute;
use crate::tokenizer::TokenKind;
use crate::transform::TransformError;

#[derive(Error, Debug)]
pub enum EvaluateError {
    #[error("unsupported operator {operator} for attribute {attribute}")]
    UnsupportedOperator {
        attribute: Attribute,
        operator: TokenKind,
    },

    #[error("unsupported value {value} for attribute {attribute}")]
    UnsupportedType { attribute: Attribute, value: String },

    #[error("invalid size value {raw}")]
    InvalidSize { raw: String },

    #[error("invalid time value {raw}")]
    InvalidTime { raw: String },

    #[error("invalid regular expression {pattern}: {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("unexpected hash algorithm {name}")]
    UnknownHashAlgorithm { name: String },

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EvaluateResult<T> = Result<T, EvaluateError>;
