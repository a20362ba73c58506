//! Error types for modifier application.

use thiserror::Error;

use crate::query::Attribute;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("function {name} is not implemented for attribute {attribute}")]
    NotImplemented { name: String, attribute: Attribute },

    #[error("unsupported format type {format} for attribute {attribute}")]
    UnsupportedFormat { format: String, attribute: Attribute },

    #[error("invalid numeric value {raw}")]
    InvalidNumber { raw: String },

    #[error("invalid time value {raw}")]
    InvalidTime { raw: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TransformResult<T> = Result<T, TransformError>;
