//! SELECT clause attribute and modifier parsing.

use crate::query::{Attribute, Modifier, Query};
use crate::tokenizer::TokenKind;

use super::error::{ParseError, ParseResult};
use super::Parser;

impl Parser {
    /// Parses one comma-separated SELECT clause entry into the query,
    /// recursing for the rest. `*` and `all` expand to every attribute.
    pub(super) fn parse_attribute_list(&mut self, query: &mut Query) -> ParseResult<()> {
        let token = match self.expect(TokenKind::Identifier) {
            Some(token) => token,
            None => return Err(self.current_error()),
        };

        if token.raw == "*" || token.raw == "all" {
            for attribute in Attribute::ALL {
                if !query.attributes.contains(&attribute) {
                    query.attributes.push(attribute);
                }
            }
        } else {
            self.current = Some(token);
            let mut modifiers = Vec::new();
            let attribute = self.parse_attribute(&mut modifiers)?;
            if !query.attributes.contains(&attribute) {
                query.attributes.push(attribute);
            }
            query.modifiers.insert(attribute, modifiers);
        }

        if self.expect(TokenKind::Comma).is_some() {
            return self.parse_attribute_list(query);
        }
        Ok(())
    }

    /// Parses an attribute wrapped in zero or more modifier calls, appending
    /// the modifiers innermost-first, which is also application order.
    ///
    /// A bare identifier leaves the following token in the cursor; a
    /// modifier chain consumes through its closing paren. Modifier names are
    /// not validated here, only attribute names.
    pub(super) fn parse_attribute(
        &mut self,
        modifiers: &mut Vec<Modifier>,
    ) -> ParseResult<Attribute> {
        let ident = match self.expect(TokenKind::Identifier) {
            Some(token) => token,
            None => return Err(self.current_error()),
        };

        if self.expect(TokenKind::OpenParen).is_none() {
            return Attribute::from_name(&ident.raw)
                .ok_or(ParseError::UnknownToken { raw: ident.raw });
        }

        let attribute = self.parse_attribute(modifiers)?;

        let mut arguments = Vec::new();
        loop {
            if let Some(token) = self.expect(TokenKind::Identifier) {
                arguments.push(token.raw);
            }
            if self.expect(TokenKind::Comma).is_some() {
                continue;
            }
            if self.expect(TokenKind::CloseParen).is_some() {
                modifiers.push(Modifier::with_arguments(&ident.raw, arguments));
                return Ok(attribute);
            }
            // Neither an argument, a comma, nor the closing paren.
            return Err(self.current_error());
        }
    }
}
