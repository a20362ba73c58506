//! Query parsing.
//!
//! The parser pulls tokens lazily and shares one token of lookahead across
//! the three clause parsers: a failed [`Parser::expect`] leaves the token in
//! the cursor for the next caller, which is how optional clauses compose.

use crate::query::{Attribute, Query};
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::walk;

pub mod attribute;
pub mod condition;
pub mod error;
pub mod source;

pub use error::{ParseError, ParseResult};

/// Parses a query string into a [`Query`].
pub fn run(input: &str) -> ParseResult<Query> {
    Parser::new(input).parse()
}

/// Parser state: the tokenizer, one token of lookahead, and the kind most
/// recently expected, kept for error reporting.
struct Parser {
    tokenizer: Tokenizer,
    current: Option<Token>,
    expected: TokenKind,
    /// Subquery nesting depth of this parser, zero at the top level.
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Parser {
        Parser::with_depth(input, 0)
    }

    fn with_depth(input: &str, depth: usize) -> Parser {
        Parser {
            tokenizer: Tokenizer::new(input),
            current: None,
            expected: TokenKind::Unknown,
            depth,
        }
    }

    fn parse(&mut self) -> ParseResult<Query> {
        let mut query = Query::default();
        self.parse_select_clause(&mut query)?;
        self.parse_from_clause(&mut query)?;
        self.parse_where_clause(&mut query)?;
        Ok(query)
    }

    /// Parses the SELECT clause. The keyword and the whole clause are
    /// optional; an absent or empty attribute list selects every attribute.
    fn parse_select_clause(&mut self, query: &mut Query) -> ParseResult<()> {
        let show_all = if self.expect(TokenKind::Select).is_none() {
            match self.current.as_ref().map(|token| token.kind) {
                Some(TokenKind::Identifier) => false,
                Some(TokenKind::From) | Some(TokenKind::Where) | None => true,
                Some(_) => return Err(self.current_error()),
            }
        } else if let Some(token) = self.expect(TokenKind::Identifier) {
            self.current = Some(token);
            false
        } else {
            true
        };

        if show_all {
            query.attributes.extend(Attribute::ALL);
            return Ok(());
        }
        self.parse_attribute_list(query)
    }

    /// Parses the FROM clause. When the keyword is absent the source list
    /// defaults to the current directory. `~` prefixes expand against the
    /// home directory, since quoted queries reach us unexpanded by the shell.
    fn parse_from_clause(&mut self, query: &mut Query) -> ParseResult<()> {
        if self.expect(TokenKind::From).is_none() {
            let err = self.current_error();
            if self.expect(TokenKind::Identifier).is_some() {
                // A bare path without the FROM keyword is malformed.
                return Err(err);
            }
            query.sources.include.push(".".to_string());
            return Ok(());
        }

        self.parse_source_list(query)?;

        if let Some(home) = dirs_next::home_dir() {
            for source in query
                .sources
                .include
                .iter_mut()
                .chain(query.sources.exclude.iter_mut())
            {
                if let Some(rest) = source.strip_prefix('~') {
                    *source = walk::clean(&home.join(rest.trim_start_matches('/')))
                        .to_string_lossy()
                        .into_owned();
                }
            }
        }
        Ok(())
    }

    /// Parses the WHERE clause. An absent clause leaves the condition empty;
    /// trailing tokens that could not start one are ignored.
    fn parse_where_clause(&mut self, query: &mut Query) -> ParseResult<()> {
        if self.expect(TokenKind::Where).is_none() {
            let err = self.current_error();
            if self.expect(TokenKind::Identifier).is_none() {
                return Ok(());
            }
            return Err(err);
        }
        query.condition = Some(self.parse_condition_tree()?);
        Ok(())
    }

    /// Returns the current token if it has the expected kind, consuming it.
    /// On a mismatch the token stays in the cursor and the expectation is
    /// recorded for [`Parser::current_error`].
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        self.expected = kind;
        if self.current.is_none() {
            self.current = self.tokenizer.next();
        }
        match &self.current {
            Some(token) if token.kind == kind => self.current.take(),
            _ => None,
        }
    }

    /// Builds the error for the token in the cursor against the most recent
    /// expectation.
    fn current_error(&self) -> ParseError {
        match &self.current {
            None => ParseError::UnexpectedEof,
            Some(token) if token.kind == TokenKind::Unknown => ParseError::UnknownToken {
                raw: token.raw.clone(),
            },
            Some(token) => ParseError::UnexpectedToken {
                expected: self.expected,
                actual: token.kind,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{Condition, ConditionNode, Modifier, Value};

    use super::*;

    fn leaf(attribute: Attribute, operator: TokenKind, value: &str) -> Condition {
        Condition {
            attribute,
            attribute_modifiers: Vec::new(),
            operator,
            value: Value::str(value),
            negate: false,
            parsed: false,
        }
    }

    #[test]
    fn test_run_full_query() {
        let query =
            run("SELECT name, size FROM ., -.git WHERE name = main.rs AND size > 100").unwrap();

        assert_eq!(query.attributes, vec![Attribute::Name, Attribute::Size]);
        assert_eq!(query.sources.include, vec![".".to_string()]);
        assert_eq!(query.sources.exclude, vec![".git".to_string()]);
        assert_eq!(
            query.condition,
            Some(ConditionNode::Branch {
                op: TokenKind::And,
                left: Box::new(ConditionNode::Leaf(leaf(
                    Attribute::Name,
                    TokenKind::Equals,
                    "main.rs"
                ))),
                right: Some(Box::new(ConditionNode::Leaf(leaf(
                    Attribute::Size,
                    TokenKind::GreaterThan,
                    "100"
                )))),
            })
        );
    }

    #[test]
    fn test_select_all_variations() {
        let expected = run("SELECT all FROM . WHERE name LIKE foo").unwrap();
        assert_eq!(expected.attributes, Attribute::ALL.to_vec());

        for input in [
            "SELECT * FROM . WHERE name LIKE foo",
            "SELECT FROM . WHERE name LIKE foo",
            "FROM . WHERE name LIKE foo",
            "WHERE name LIKE foo",
        ] {
            assert_eq!(run(input).unwrap(), expected, "input: {input}");
        }
    }

    // No clauses at all still parses: everything, from here, unfiltered.
    #[test]
    fn test_empty_input() {
        let query = run("").unwrap();
        assert_eq!(query.attributes, Attribute::ALL.to_vec());
        assert_eq!(query.sources.include, vec![".".to_string()]);
        assert!(query.condition.is_none());
    }

    #[test]
    fn test_select_clause_attributes() {
        let query = run("SELECT name FROM .").unwrap();
        assert_eq!(query.attributes, vec![Attribute::Name]);
        assert_eq!(query.modifiers.get(&Attribute::Name), Some(&Vec::new()));

        let query = run("SELECT format(size, kb) FROM .").unwrap();
        assert_eq!(
            query.modifiers.get(&Attribute::Size),
            Some(&vec![Modifier::with_arguments("FORMAT", vec!["kb".into()])])
        );
    }

    #[test]
    fn test_missing_from_defaults_to_current_directory() {
        let query = run("SELECT name WHERE name = foo").unwrap();
        assert_eq!(query.sources.include, vec![".".to_string()]);
        assert!(query.condition.is_some());
    }

    #[test]
    fn test_bare_path_without_from_keyword() {
        assert!(matches!(
            run("SELECT name . WHERE name = foo").unwrap_err(),
            ParseError::UnexpectedToken {
                expected: TokenKind::From,
                actual: TokenKind::Identifier,
            }
        ));
    }

    #[test]
    fn test_missing_where_with_trailing_identifier() {
        assert!(matches!(
            run("SELECT name FROM . name LIKE foo").unwrap_err(),
            ParseError::UnexpectedToken {
                expected: TokenKind::Where,
                actual: TokenKind::Identifier,
            }
        ));
    }

    #[test]
    fn test_missing_where_clause_is_fine() {
        let query = run("SELECT name FROM .").unwrap();
        assert!(query.condition.is_none());
    }

    #[test]
    fn test_where_without_conditions() {
        assert!(matches!(
            run("SELECT name FROM . WHERE").unwrap_err(),
            ParseError::UnexpectedEof
        ));
    }

    #[test]
    fn test_from_where_is_rejected() {
        assert!(matches!(
            run("SELECT name FROM WHERE name = foo").unwrap_err(),
            ParseError::UnexpectedToken {
                expected: TokenKind::Identifier,
                actual: TokenKind::Where,
            }
        ));
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = dirs_next::home_dir() {
            let query = run("SELECT name FROM ~/foo, -~/foo/bar").unwrap();
            assert_eq!(
                query.sources.include,
                vec![home.join("foo").to_string_lossy().into_owned()]
            );
            assert_eq!(
                query.sources.exclude,
                vec![home.join("foo/bar").to_string_lossy().into_owned()]
            );
        }
    }

    // Aliases keep the path as written, before tilde expansion.
    #[test]
    fn test_alias_keeps_unexpanded_path() {
        let query = run("SELECT name FROM ~/foo AS foo").unwrap();
        assert_eq!(query.source_aliases.get("foo"), Some(&"~/foo".to_string()));
    }

    #[test]
    fn test_expect_consumes_only_matches() {
        let mut parser = Parser::new("SELECT all FROM .");

        assert!(parser.expect(TokenKind::From).is_none());
        assert!(parser.expect(TokenKind::Select).is_some());
        assert!(parser.expect(TokenKind::Identifier).is_some());
        assert!(parser.expect(TokenKind::Identifier).is_none());
        assert!(parser.expect(TokenKind::From).is_some());
        assert!(parser.expect(TokenKind::Where).is_none());
        assert!(parser.expect(TokenKind::Identifier).is_some());
        assert!(parser.expect(TokenKind::Identifier).is_none());
    }

    #[test]
    fn test_render_reparse_equivalence() {
        for input in [
            "SELECT name, size FROM ., -.git WHERE name LIKE %.rs AND size > 100",
            "SELECT upper(name) FROM . WHERE NOT name = foo OR (size <= 1kb AND mode IS dir)",
        ] {
            let query = run(input).unwrap();
            assert_eq!(run(&query.to_string()).unwrap(), query, "input: {input}");
        }
    }
}
