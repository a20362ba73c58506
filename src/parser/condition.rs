//! WHERE clause parsing: the condition stack machine and subqueries.

use std::collections::HashSet;

use crate::query::{Attribute, Condition, ConditionNode, Value};
use crate::tokenizer::TokenKind;

use super::error::{ParseError, ParseResult};
use super::Parser;

/// Nesting bound for `IN (...)` subqueries; hit only by pathological input.
const MAX_SUBQUERY_DEPTH: usize = 16;

/// One slot of the condition stack: either a partially built tree or the
/// boundary a `(` leaves behind.
enum StackSlot {
    Boundary,
    Node(ConditionNode),
}

impl Parser {
    /// Parses the condition tree after WHERE with a single stack.
    ///
    /// Leaves attach to the open branch on top of the stack; `(` pushes a
    /// boundary and `)` reduces back to it. Anything that would silently
    /// overwrite part of the tree is a parse failure instead.
    pub(super) fn parse_condition_tree(&mut self) -> ParseResult<ConditionNode> {
        let mut stack: Vec<StackSlot> = Vec::new();

        loop {
            self.current = self.tokenizer.next();
            let kind = match &self.current {
                Some(token) => token.kind,
                None => break,
            };

            match kind {
                TokenKind::Not | TokenKind::Identifier => {
                    let leaf = ConditionNode::Leaf(self.parse_condition()?);
                    match stack.pop() {
                        Some(StackSlot::Node(ConditionNode::Branch {
                            op,
                            left,
                            right: None,
                        })) => {
                            stack.push(StackSlot::Node(ConditionNode::Branch {
                                op,
                                left,
                                right: Some(Box::new(leaf)),
                            }));
                        }
                        Some(StackSlot::Node(_)) => {
                            return Err(ParseError::FailedToParseConditions)
                        }
                        // Top of stack is a `(` boundary (consumed here) or
                        // nothing; either way the leaf starts a new operand.
                        Some(StackSlot::Boundary) | None => stack.push(StackSlot::Node(leaf)),
                    }
                }
                TokenKind::And | TokenKind::Or => {
                    let left = match stack.pop() {
                        Some(StackSlot::Node(node)) => node,
                        _ => return Err(ParseError::FailedToParseConditions),
                    };
                    stack.push(StackSlot::Node(ConditionNode::Branch {
                        op: kind,
                        left: Box::new(left),
                        right: None,
                    }));
                }
                TokenKind::OpenParen => stack.push(StackSlot::Boundary),
                TokenKind::CloseParen => {
                    let node = match stack.pop() {
                        Some(StackSlot::Node(node)) => node,
                        _ => return Err(ParseError::FailedToParseConditions),
                    };
                    match stack.pop() {
                        Some(StackSlot::Node(ConditionNode::Branch {
                            op,
                            left,
                            right: None,
                        })) => {
                            stack.push(StackSlot::Node(ConditionNode::Branch {
                                op,
                                left,
                                right: Some(Box::new(node)),
                            }));
                        }
                        Some(StackSlot::Node(_)) => {
                            return Err(ParseError::FailedToParseConditions)
                        }
                        // No enclosing operator; keep the bare subtree.
                        Some(StackSlot::Boundary) | None => stack.push(StackSlot::Node(node)),
                    }
                }
                _ => {}
            }
        }

        if stack.len() > 1 {
            return Err(ParseError::FailedToParseConditions);
        }
        match stack.pop() {
            Some(StackSlot::Node(node)) => Ok(node),
            Some(StackSlot::Boundary) => Err(ParseError::FailedToParseConditions),
            None => Err(self.current_error()),
        }
    }

    /// Parses one `[NOT] attribute operator value` leaf. The attribute may
    /// carry a modifier chain; the value is a literal, a bracketed list, or
    /// an `IN (...)` subquery resolved eagerly here.
    fn parse_condition(&mut self) -> ParseResult<Condition> {
        let negate = self.expect(TokenKind::Not).is_some();

        let mut attribute_modifiers = Vec::new();
        let attribute = self.parse_attribute(&mut attribute_modifiers)?;
        if !attribute_modifiers.is_empty() {
            // A modifier chain consumes through its closing paren; pull the
            // operator in. A bare attribute leaves the operator in the cursor.
            self.current = self.tokenizer.next();
        }

        let operator = match self.current.take() {
            Some(token) => token.kind,
            None => return Err(self.current_error()),
        };

        let value = if self.expect(TokenKind::OpenParen).is_some() {
            let subquery = match self.expect(TokenKind::Subquery) {
                Some(token) => token,
                None => return Err(self.current_error()),
            };
            if self.expect(TokenKind::CloseParen).is_none() {
                return Err(self.current_error());
            }
            self.resolve_subquery(&subquery.raw)?
        } else if self.expect(TokenKind::OpenBracket).is_some() {
            // Only reachable when the operator is not IN: the tokenizer folds
            // an IN list into a single comma-joined identifier.
            let mut list = Vec::new();
            loop {
                if let Some(token) = self.expect(TokenKind::Identifier) {
                    list.push(token.raw);
                }
                if self.expect(TokenKind::Comma).is_some() {
                    continue;
                }
                if self.expect(TokenKind::CloseBracket).is_some() {
                    break;
                }
                return Err(self.current_error());
            }
            Value::List(list)
        } else {
            match self.expect(TokenKind::Identifier) {
                Some(token) => Value::str(token.raw),
                None => return Err(self.current_error()),
            }
        };

        Ok(Condition {
            attribute,
            attribute_modifiers,
            operator,
            value,
            negate,
            parsed: false,
        })
    }

    /// Runs a subquery and collapses its rows into a set for IN.
    ///
    /// Of the selected attributes, the first of name, size, time, mode is
    /// collected; a hash-only subquery yields the empty set.
    fn resolve_subquery(&mut self, input: &str) -> ParseResult<Value> {
        if self.depth >= MAX_SUBQUERY_DEPTH {
            return Err(ParseError::SubqueryDepthExceeded);
        }

        let mut query = Parser::with_depth(input, self.depth + 1).parse()?;
        if !query.source_aliases.is_empty() {
            // A subquery that aliases its sources wants evaluation against
            // each outer file; reject it up front.
            return Err(ParseError::CorrelatedSubquery);
        }

        let rows = query
            .execute()
            .map_err(|source| ParseError::Subquery(Box::new(source)))?;

        let collected = [
            Attribute::Name,
            Attribute::Size,
            Attribute::Time,
            Attribute::Mode,
        ]
        .into_iter()
        .find(|attribute| query.has_attribute(*attribute));

        let mut values = HashSet::new();
        if let Some(attribute) = collected {
            for mut row in rows {
                if let Some(value) = row.remove(&attribute) {
                    values.insert(value);
                }
            }
        }
        Ok(Value::Set(values))
    }
}
