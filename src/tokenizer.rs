//! Lexical analysis for the query language.
//!
//! The tokenizer is lazy: `Tokenizer::next` scans one token at a time, and
//! keeps a two-token history of emitted kinds so that `IN (...)` subqueries
//! and `IN [...]` lists can be captured as single tokens.

pub mod scanner;
pub mod token;

pub use scanner::Tokenizer;
pub use token::{Token, TokenKind};
