//! Statement parsing implementation
//!
//! This module handles parsing of blocks and every statement form:
//!
//! - Declarations and assignments: `var x = 1;`, `x = x + 1;`
//! - Output: `print expr;`
//! - Control flow: `if`, `while`, `break`, `continue`
//! - Functions: `fn name(a, b) { ... }`, `return [expr];`
//! - Call statements: `name(args);`
//!
//! # Grammar
//!
//! ```text
//! block     ::= { statement }                      (until 'eof' or '}')
//! statement ::= declaration | print | if | while | break | continue
//!             | function | return | id ( '=' expr | call_args ) ';'
//! ```
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::config::BareIdentifier;
use crate::parser::ast::*;
use crate::parser::lexer::Symbol;
use crate::parser::parse::{ParseError, Parser};

/// Tokens that can start a statement, in the order they are tried
const STATEMENT_START: [Symbol; 9] = [
    Symbol::Var,
    Symbol::Print,
    Symbol::If,
    Symbol::While,
    Symbol::Break,
    Symbol::Continue,
    Symbol::Fn,
    Symbol::Return,
    Symbol::Id,
];

impl Parser {
    /// Parse statements up to `eof` or `}`, leaving that token unconsumed
    pub fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.nested(|p| {
            let mut statements = Vec::new();

            while !p.accept(Symbol::Eof) && !p.accept(Symbol::RBrace) {
                if let Some(statement) = p.parse_statement()? {
                    statements.push(statement);
                }
            }

            Ok(AstNode::Block {
                statements,
                location,
            })
        })
    }

    /// Parse a statement.
    ///
    /// Returns `None` only for a discarded bare identifier statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<AstNode>, ParseError> {
        let loc = self.current_location();

        let statement = match self.current.symbol {
            Symbol::Var => self.parse_declaration()?,
            Symbol::Print => self.parse_print_statement()?,
            Symbol::If => {
                self.expect(Symbol::If)?;
                let (condition, body) = self.parse_condition_and_body()?;
                AstNode::IfStatement {
                    condition,
                    body,
                    location: loc,
                }
            }
            Symbol::While => {
                self.expect(Symbol::While)?;
                let (condition, body) = self.parse_condition_and_body()?;
                AstNode::WhileStatement {
                    condition,
                    body,
                    location: loc,
                }
            }
            Symbol::Break => {
                self.expect(Symbol::Break)?;
                self.expect(Symbol::Semicolon)?;
                AstNode::BreakStatement { location: loc }
            }
            Symbol::Continue => {
                self.expect(Symbol::Continue)?;
                self.expect(Symbol::Semicolon)?;
                AstNode::ContinueStatement { location: loc }
            }
            Symbol::Fn => self.parse_function_statement()?,
            Symbol::Return => self.parse_return_statement()?,
            Symbol::Id => return self.parse_identifier_statement(),
            _ => return Err(self.unexpected(&STATEMENT_START)),
        };

        Ok(Some(statement))
    }

    /// `var id = expr ;`
    fn parse_declaration(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect(Symbol::Var)?;
        let name = self.expect(Symbol::Id)?;
        self.expect(Symbol::Eq)?;
        let expr = self.parse_boolean_expression()?;
        self.expect(Symbol::Semicolon)?;

        Ok(AstNode::DeclarationStatement {
            name,
            expr: Box::new(expr),
            location: loc,
        })
    }

    /// `print expr ;`
    fn parse_print_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect(Symbol::Print)?;
        let expr = self.parse_boolean_expression()?;
        self.expect(Symbol::Semicolon)?;

        Ok(AstNode::PrintStatement {
            expr: Box::new(expr),
            location: loc,
        })
    }

    /// Shared tail of `if` and `while`: `expr '{' block '}'`
    fn parse_condition_and_body(&mut self) -> Result<(Box<AstNode>, Box<AstNode>), ParseError> {
        let condition = self.parse_boolean_expression()?;
        let body = self.parse_braced_block()?;
        Ok((Box::new(condition), Box::new(body)))
    }

    fn parse_braced_block(&mut self) -> Result<AstNode, ParseError> {
        self.expect(Symbol::LBrace)?;
        let block = self.parse_block()?;
        self.expect(Symbol::RBrace)?;
        Ok(block)
    }

    /// `fn id ( [id {, id}] ) { block }`
    fn parse_function_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect(Symbol::Fn)?;
        let name = self.expect(Symbol::Id)?;

        self.expect(Symbol::LParen)?;
        let mut params = Vec::new();
        if self.accept(Symbol::Id) {
            params.push(self.expect(Symbol::Id)?);
            while self.match_symbol(Symbol::Comma)? {
                params.push(self.expect(Symbol::Id)?);
            }
        }
        self.expect(Symbol::RParen)?;

        let body = self.parse_braced_block()?;

        Ok(AstNode::FunctionStatement {
            name,
            params,
            body: Box::new(body),
            location: loc,
        })
    }

    /// `return [expr] ;`
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect(Symbol::Return)?;

        let expr = if self.accept(Symbol::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_boolean_expression()?))
        };
        self.expect(Symbol::Semicolon)?;

        Ok(AstNode::ReturnStatement { expr, location: loc })
    }

    /// Assignment or call, decided by the token after the identifier
    fn parse_identifier_statement(&mut self) -> Result<Option<AstNode>, ParseError> {
        let loc = self.current_location();
        let name = self.expect(Symbol::Id)?;

        let statement = if self.match_symbol(Symbol::Eq)? {
            let expr = self.parse_boolean_expression()?;
            Some(AstNode::AssignmentStatement {
                name,
                expr: Box::new(expr),
                location: loc,
            })
        } else if self.accept(Symbol::LParen) {
            Some(self.parse_call_expression(name, loc)?)
        } else {
            match self.bare_identifier {
                BareIdentifier::Discard => None,
                BareIdentifier::Reject => {
                    return Err(self.unexpected(&[Symbol::Eq, Symbol::LParen]));
                }
            }
        };

        self.expect(Symbol::Semicolon)?;
        Ok(statement)
    }
}
