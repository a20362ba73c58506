//! Token definitions for the query language.

use std::fmt;

/// A token's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Unknown,

    Identifier,
    Subquery,

    Select,
    From,
    Where,

    As,
    Or,
    And,
    Not,

    In,
    Is,
    Like,
    RLike,

    Equals,
    NotEquals,
    GreaterThanEquals,
    GreaterThan,
    LessThanEquals,
    LessThan,

    Comma,
    Hyphen,
    ExclamationMark,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
}

impl TokenKind {
    /// Classifies a bare word as a keyword kind, if it is one. Keywords are
    /// case-insensitive; `REGEXP` is an accepted spelling of `RLIKE`.
    pub fn from_keyword(word: &str) -> Option<TokenKind> {
        match word.to_uppercase().as_str() {
            "SELECT" => Some(TokenKind::Select),
            "FROM" => Some(TokenKind::From),
            "WHERE" => Some(TokenKind::Where),
            "AS" => Some(TokenKind::As),
            "OR" => Some(TokenKind::Or),
            "AND" => Some(TokenKind::And),
            "NOT" => Some(TokenKind::Not),
            "IN" => Some(TokenKind::In),
            "IS" => Some(TokenKind::Is),
            "LIKE" => Some(TokenKind::Like),
            "RLIKE" | "REGEXP" => Some(TokenKind::RLike),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Unknown => "unknown",
            TokenKind::Identifier => "identifier",
            TokenKind::Subquery => "subquery",
            TokenKind::Select => "select",
            TokenKind::From => "from",
            TokenKind::Where => "where",
            TokenKind::As => "as",
            TokenKind::Or => "or",
            TokenKind::And => "and",
            TokenKind::Not => "not",
            TokenKind::In => "in",
            TokenKind::Is => "is",
            TokenKind::Like => "like",
            TokenKind::RLike => "RLike",
            TokenKind::Equals => "equal",
            TokenKind::NotEquals => "not-equal",
            TokenKind::GreaterThanEquals => "greater-than-or-equal",
            TokenKind::GreaterThan => "greater-than",
            TokenKind::LessThanEquals => "less-than-or-equal",
            TokenKind::LessThan => "less-than",
            TokenKind::Comma => "comma",
            TokenKind::Hyphen => "hyphen",
            TokenKind::ExclamationMark => "exclamation-mark",
            TokenKind::OpenParen => "open-parentheses",
            TokenKind::CloseParen => "close-parentheses",
            TokenKind::OpenBracket => "open-bracket",
            TokenKind::CloseBracket => "close-bracket",
        };
        write!(f, "{}", name)
    }
}

/// A single token: its kind plus the raw text it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Token {
            kind,
            raw: raw.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{kind: {}, raw: \"{}\"}}", self.kind, self.raw)
    }
}
