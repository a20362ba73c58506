//! Parse errors.

use thiserror::Error;

use crate::tokenizer::TokenKind;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected EOF")]
    UnexpectedEof,

    #[error("expected {expected}; got {actual}")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("unknown token: {raw}")]
    UnknownToken { raw: String },

    #[error("failed to parse conditions")]
    FailedToParseConditions,

    #[error("cannot alias excluded directory {path}")]
    AliasedExclusion { path: String },

    #[error("correlated subqueries are not supported")]
    CorrelatedSubquery,

    #[error("subquery nesting too deep")]
    SubqueryDepthExceeded,

    #[error("Subquery error: {0}")]
    Subquery(Box<crate::Error>),
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
