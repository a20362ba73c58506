//! Attributes and the typed values that flow through conditions and rows.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local};

/// A file attribute that can be selected, filtered on, or modified.
///
/// Variant order is the column order of `SELECT all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Mode,
    Size,
    Time,
    Hash,
    Name,
}

impl Attribute {
    /// Every attribute, in `SELECT all` column order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Mode,
        Attribute::Size,
        Attribute::Time,
        Attribute::Hash,
        Attribute::Name,
    ];

    /// Looks up an attribute by its query spelling. Spellings are lowercase
    /// and case-sensitive.
    pub fn from_name(name: &str) -> Option<Attribute> {
        match name {
            "mode" => Some(Attribute::Mode),
            "size" => Some(Attribute::Size),
            "time" => Some(Attribute::Time),
            "hash" => Some(Attribute::Hash),
            "name" => Some(Attribute::Name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Mode => "mode",
            Attribute::Size => "size",
            Attribute::Time => "time",
            Attribute::Hash => "hash",
            Attribute::Name => "name",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single typed value: an attribute's output for one file, or a condition's
/// comparison target once its modifiers have been applied.
///
/// `Time` keeps the zoned timestamp so chronological comparisons and set
/// membership work without re-parsing rendered strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Time(DateTime<Local>),
}

/// Default rendering of a timestamp, in the style of `ls -l`.
pub const TIME_STAMP_LAYOUT: &str = "%b %e %H:%M:%S";

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Time(t) => write!(f, "{}", t.format(TIME_STAMP_LAYOUT)),
        }
    }
}

/// A condition's right-hand side.
///
/// A freshly parsed condition holds `Scalar(Str(..))` or `List`; subquery
/// resolution and modifier application rewrite it to `Set` or a typed
/// `Scalar`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<String>),
    Set(HashSet<Scalar>),
}

impl Value {
    /// Shorthand for the untyped string value a parse produces.
    pub fn str(raw: impl Into<String>) -> Value {
        Value::Scalar(Scalar::Str(raw.into()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(Scalar::Str(s)) if s.contains(char::is_whitespace) || s.is_empty() => {
                write!(f, "'{}'", s)
            }
            Value::Scalar(s) => write!(f, "{}", s),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Set(set) => {
                let mut items: Vec<String> = set.iter().map(|s| s.to_string()).collect();
                items.sort();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}
