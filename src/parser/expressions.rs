//! Expression parsing implementation
//!
//! Precedence is encoded by nesting one method per level, lowest first:
//!
//! ```text
//! boolean_expression ::= and_expression { 'or' and_expression }
//! and_expression     ::= condition { 'and' condition }
//! condition          ::= logical_operand [ ('=='|'!='|'>='|'>'|'<'|'<=') logical_operand ]
//! logical_operand    ::= term { ('+'|'-') term }
//! term               ::= not_expression { ('*'|'/') not_expression }
//! not_expression     ::= 'not' not_expression | atom
//! atom               ::= id [ call_args ] | number | string | 'true' | 'false'
//!                      | '(' boolean_expression ')'
//! call_args          ::= '(' [ boolean_expression { ',' boolean_expression } ] ')'
//! ```
//!
//! Binary levels accumulate left-associatively in a loop; `not` nests to the
//! right. Comparisons do not chain: `a < b < c` stops after `a < b`.

use crate::parser::ast::*;
use crate::parser::lexer::Symbol;
use crate::parser::parse::{ParseError, Parser};

/// Tokens that can start an operand
const OPERAND_START: [Symbol; 7] = [
    Symbol::Id,
    Symbol::Number,
    Symbol::String,
    Symbol::True,
    Symbol::False,
    Symbol::LParen,
    Symbol::Not,
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_boolean_expression(&mut self) -> Result<AstNode, ParseError> {
        self.nested(|p| {
            let mut left = p.parse_and_expression()?;

            while p.accept(Symbol::Or) {
                let loc = p.current_location();
                p.expect(Symbol::Or)?;
                let right = p.parse_and_expression()?;
                left = AstNode::BooleanExpression {
                    left: Box::new(left),
                    op: BoolOp::Or,
                    right: Box::new(right),
                    location: loc,
                };
            }

            Ok(left)
        })
    }

    /// Parse `and` chains
    fn parse_and_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_condition()?;

        while self.accept(Symbol::And) {
            let loc = self.current_location();
            self.expect(Symbol::And)?;
            let right = self.parse_condition()?;
            left = AstNode::BooleanExpression {
                left: Box::new(left),
                op: BoolOp::And,
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse an optional single comparison
    fn parse_condition(&mut self) -> Result<AstNode, ParseError> {
        let left = self.parse_logical_operand()?;

        let loc = self.current_location();
        let op = match self.current.symbol {
            Symbol::EqEq => BoolOp::Eq,
            Symbol::NotEq => BoolOp::Ne,
            Symbol::Ge => BoolOp::Ge,
            Symbol::Gt => BoolOp::Gt,
            Symbol::Lt => BoolOp::Lt,
            Symbol::Le => BoolOp::Le,
            _ => return Ok(left),
        };
        self.expect(self.current.symbol)?;

        let right = self.parse_logical_operand()?;
        Ok(AstNode::BooleanExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
            location: loc,
        })
    }

    /// Parse additive chains (+ -)
    fn parse_logical_operand(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_symbol(Symbol::Plus)? {
                AddOp::Add
            } else if self.match_symbol(Symbol::Minus)? {
                AddOp::Sub
            } else {
                break;
            };

            let right = self.parse_term()?;
            left = AstNode::LogicalOperand {
                left: Box::new(left),
                op,
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative chains (* /)
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_not_expression()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_symbol(Symbol::Star)? {
                MulOp::Mul
            } else if self.match_symbol(Symbol::Slash)? {
                MulOp::Div
            } else {
                break;
            };

            let right = self.parse_not_expression()?;
            left = AstNode::Term {
                left: Box::new(left),
                op,
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse prefix `not` (right-nesting)
    fn parse_not_expression(&mut self) -> Result<AstNode, ParseError> {
        if !self.accept(Symbol::Not) {
            return self.parse_atom();
        }

        let loc = self.current_location();
        self.expect(Symbol::Not)?;
        let expr = self.nested(|p| p.parse_not_expression())?;
        Ok(AstNode::LogicalNotExpression {
            expr: Box::new(expr),
            location: loc,
        })
    }

    /// Parse literals, identifiers, calls and parenthesized expressions
    fn parse_atom(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        match self.current.symbol {
            Symbol::Id => {
                let name = self.expect(Symbol::Id)?;
                if self.accept(Symbol::LParen) {
                    self.parse_call_expression(name, loc)
                } else {
                    Ok(AstNode::Identifier(name, loc))
                }
            }
            Symbol::Number => Ok(AstNode::NumberLiteral(self.expect(Symbol::Number)?, loc)),
            Symbol::String => Ok(AstNode::StringLiteral(self.expect(Symbol::String)?, loc)),
            Symbol::True => {
                self.expect(Symbol::True)?;
                Ok(AstNode::BooleanLiteral(true, loc))
            }
            Symbol::False => {
                self.expect(Symbol::False)?;
                Ok(AstNode::BooleanLiteral(false, loc))
            }
            Symbol::LParen => {
                self.expect(Symbol::LParen)?;
                let expr = self.parse_boolean_expression()?;
                self.expect(Symbol::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected(&OPERAND_START)),
        }
    }

    /// Parse `( [expr {, expr}] )` after a callee name already consumed
    pub(crate) fn parse_call_expression(
        &mut self,
        name: String,
        location: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        self.expect(Symbol::LParen)?;

        let mut args = Vec::new();
        if !self.accept(Symbol::RParen) {
            args.push(self.parse_boolean_expression()?);
            while self.match_symbol(Symbol::Comma)? {
                args.push(self.parse_boolean_expression()?);
            }
        }

        self.expect(Symbol::RParen)?;

        Ok(AstNode::CallExpression {
            name,
            args,
            location,
        })
    }
}
