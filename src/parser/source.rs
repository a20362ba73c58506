//! FROM clause source parsing.

use std::path::Path;

use crate::query::Query;
use crate::tokenizer::TokenKind;
use crate::walk;

use super::error::{ParseError, ParseResult};
use super::Parser;

impl Parser {
    /// Parses one comma-separated FROM clause entry into the query,
    /// recursing for the rest. A leading hyphen marks an exclusion; an
    /// `AS alias` suffix registers the directory under an alias.
    pub(super) fn parse_source_list(&mut self, query: &mut Query) -> ParseResult<()> {
        let exclude = self.expect(TokenKind::Hyphen).is_some();

        let source = match self.expect(TokenKind::Identifier) {
            Some(token) => token,
            None => return Err(self.current_error()),
        };
        let path = walk::clean(Path::new(&source.raw))
            .to_string_lossy()
            .into_owned();

        if exclude {
            query.sources.exclude.push(path.clone());
        } else {
            query.sources.include.push(path.clone());
        }

        if self.expect(TokenKind::As).is_some() {
            let alias = match self.expect(TokenKind::Identifier) {
                Some(token) => token,
                None => return Err(self.current_error()),
            };
            if exclude {
                return Err(ParseError::AliasedExclusion { path });
            }
            query.source_aliases.insert(alias.raw, path);
        }

        if self.expect(TokenKind::Comma).is_some() {
            return self.parse_source_list(query);
        }
        Ok(())
    }
}
