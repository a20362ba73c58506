//! WHERE clause conditions and the condition tree.

use std::fmt;

use crate::evaluate::{compare, EvaluateResult};
use crate::tokenizer::TokenKind;
use crate::transform::{parse, TransformResult};
use crate::walk::FileInfo;

use super::modifier::{self, Modifier};
use super::value::{Attribute, Value};

/// A single comparison from the WHERE clause.
///
/// The value starts out as the literal the query was written with; the
/// attribute modifiers type it on first evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: Attribute,
    pub attribute_modifiers: Vec<Modifier>,
    pub operator: TokenKind,
    pub value: Value,
    pub negate: bool,
    /// Set once the value has been run through the attribute modifiers.
    pub parsed: bool,
}

impl Condition {
    /// Runs the condition's value through its attribute modifiers, typing the
    /// literal for comparison.
    pub fn apply_modifiers(&mut self) -> TransformResult<()> {
        let mut value = self.value.clone();
        for modifier in &self.attribute_modifiers {
            value = parse::apply(self.attribute, modifier, value)?;
        }
        self.value = value;
        self.parsed = true;
        Ok(())
    }

    fn evaluate(&mut self, info: &FileInfo) -> EvaluateResult<bool> {
        if !self.parsed {
            self.apply_modifiers()?;
        }
        let result = compare::evaluate(self, info)?;
        if self.negate {
            return Ok(!result);
        }
        Ok(result)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            write!(f, "NOT ")?;
        }
        let lhs = modifier::wrap(&self.attribute.to_string(), &self.attribute_modifiers);
        write!(f, "{} {} {}", lhs, operator_str(self.operator), self.value)
    }
}

/// A node of the WHERE clause tree.
///
/// Branches hold `AND`/`OR`. The right arm stays empty while the parser is
/// still attaching operands; an empty right arm evaluates to true.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    Leaf(Condition),
    Branch {
        op: TokenKind,
        left: Box<ConditionNode>,
        right: Option<Box<ConditionNode>>,
    },
}

impl ConditionNode {
    /// Evaluates the tree against a single file. Both `AND` and `OR` short
    /// circuit on the left arm.
    pub fn evaluate(&mut self, info: &FileInfo) -> EvaluateResult<bool> {
        match self {
            ConditionNode::Leaf(condition) => condition.evaluate(info),
            ConditionNode::Branch { op, left, right } => match *op {
                TokenKind::And => {
                    if !left.evaluate(info)? {
                        return Ok(false);
                    }
                    match right {
                        Some(right) => right.evaluate(info),
                        None => Ok(true),
                    }
                }
                TokenKind::Or => {
                    if left.evaluate(info)? {
                        return Ok(true);
                    }
                    match right {
                        Some(right) => right.evaluate(info),
                        None => Ok(true),
                    }
                }
                _ => Ok(false),
            },
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionNode::Leaf(condition) => condition.fmt(f),
            ConditionNode::Branch { op, left, right } => {
                let op = match *op {
                    TokenKind::And => "AND",
                    TokenKind::Or => "OR",
                    _ => "?",
                };
                match right {
                    Some(right) => write!(f, "({left} {op} {right})"),
                    None => write!(f, "({left} {op})"),
                }
            }
        }
    }
}

fn operator_str(operator: TokenKind) -> &'static str {
    match operator {
        TokenKind::Equals => "=",
        TokenKind::NotEquals => "!=",
        TokenKind::GreaterThanEquals => ">=",
        TokenKind::GreaterThan => ">",
        TokenKind::LessThanEquals => "<=",
        TokenKind::LessThan => "<",
        TokenKind::Like => "LIKE",
        TokenKind::RLike => "RLIKE",
        TokenKind::In => "IN",
        TokenKind::Is => "IS",
        _ => "?",
    }
}
