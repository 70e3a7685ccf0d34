//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser is a one-token-lookahead recursive descent parser:
//! - This module: Parser struct, `accept`/`expect`, nesting guard, entry points
//! - `statements`: blocks and statements (`var`, `print`, `if`, `while`, `fn`, ...)
//! - `expressions`: boolean/arithmetic expressions, one method per precedence level
//!
//! Tokens are pulled from the [`Lexer`] one at a time; the parser holds only
//! the current token and replaces it on every successful `expect`.

use crate::config::{BareIdentifier, Config};
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Symbol, Token};
use crate::trace::StderrTrace;
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The lexer could not produce the next token
    Lex(LexError),

    /// The current token is not one the grammar allows here
    Syntax {
        expected: Vec<Symbol>,
        found: Symbol,
        location: SourceLocation,
    },

    /// Blocks or expressions nested deeper than the configured limit
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::Syntax { location, .. } => *location,
            ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::Syntax {
                expected,
                found,
                location,
            } => {
                let expected: Vec<&str> = expected.iter().map(|s| s.as_str()).collect();
                write!(
                    f,
                    "Parse error at line {}, column {}: expected '{}', got '{}'",
                    location.line,
                    location.column,
                    expected.join("|"),
                    found
                )
            }
            ParseError::NestingTooDeep { limit, location } => write!(
                f,
                "Parse error at line {}, column {}: nesting exceeds {} levels",
                location.line, location.column, limit
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Recursive descent parser for scrawl
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    depth: usize,
    max_depth: usize,
    pub(crate) bare_identifier: BareIdentifier,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_config(source, &Config::default())
    }

    /// Build a parser whose lexer honors `config` (strict strings, token trace)
    pub fn with_config(source: &str, config: &Config) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source).with_strict_strings(config.strict_strings);
        if config.lex_debug {
            lexer = lexer.with_trace(Box::new(StderrTrace));
        }
        Self::from_lexer(lexer, config)
    }

    /// Wrap an already configured lexer; lexes the first token.
    pub fn from_lexer(mut lexer: Lexer, config: &Config) -> Result<Self, ParseError> {
        let current = lexer.lex()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            max_depth: config.max_depth,
            bare_identifier: config.bare_identifier,
        })
    }

    /// Parse a whole source file: a block that must end at end of input
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let block = self.parse_block()?;
        if !self.accept(Symbol::Eof) {
            return Err(self.unexpected(&[Symbol::Eof]));
        }
        Ok(block)
    }

    /// Whether the current token has the given symbol; consumes nothing
    pub fn accept(&self, symbol: Symbol) -> bool {
        self.current.is(symbol)
    }

    /// Consume the current token if it has the given symbol and return its
    /// raw value; otherwise fail without consuming.
    pub fn expect(&mut self, symbol: Symbol) -> Result<String, ParseError> {
        if !self.accept(symbol) {
            return Err(self.unexpected(&[symbol]));
        }
        let next = self.lexer.lex()?;
        let token = std::mem::replace(&mut self.current, next);
        Ok(token.value)
    }

    /// Consume the current token if it has the given symbol
    pub(crate) fn match_symbol(&mut self, symbol: Symbol) -> Result<bool, ParseError> {
        if self.accept(symbol) {
            self.expect(symbol)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// Syntax error at the current token
    pub(crate) fn unexpected(&self, expected: &[Symbol]) -> ParseError {
        ParseError::Syntax {
            expected: expected.to_vec(),
            found: self.current.symbol,
            location: self.current.location,
        }
    }

    /// Run `f` one nesting level deeper, failing once the limit is reached
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                location: self.current_location(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Parse `source` as a program with the default configuration
pub fn parse(source: &str) -> Result<AstNode, ParseError> {
    Parser::new(source)?.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_does_not_consume() {
        let parser = Parser::new("var x").unwrap();
        assert!(parser.accept(Symbol::Var));
        assert!(parser.accept(Symbol::Var));
        assert!(!parser.accept(Symbol::Id));
    }

    #[test]
    fn test_expect_returns_value_and_advances() {
        let mut parser = Parser::new("var count").unwrap();
        assert_eq!(parser.expect(Symbol::Var).unwrap(), "var");
        assert_eq!(parser.expect(Symbol::Id).unwrap(), "count");
        assert!(parser.accept(Symbol::Eof));
        assert_eq!(parser.expect(Symbol::Eof).unwrap(), "eof");
        assert!(parser.accept(Symbol::Eof));
    }

    #[test]
    fn test_expect_mismatch() {
        let mut parser = Parser::new("\n  print").unwrap();
        let err = parser.expect(Symbol::Var).unwrap_err();

        assert_eq!(
            err,
            ParseError::Syntax {
                expected: vec![Symbol::Var],
                found: Symbol::Print,
                location: SourceLocation::new(2, 3),
            }
        );
        assert_eq!(
            err.to_string(),
            "Parse error at line 2, column 3: expected 'var', got 'print'"
        );
        // nothing consumed
        assert!(parser.accept(Symbol::Print));
    }

    #[test]
    fn test_lex_error_on_first_token() {
        let err = Parser::new("@").err().unwrap();
        assert!(matches!(err, ParseError::Lex(LexError::UnexpectedCharacter { ch: '@', .. })));
        assert_eq!(err.location(), SourceLocation::new(1, 1));
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = parse("print 1; }").unwrap_err();
        match err {
            ParseError::Syntax {
                expected, found, ..
            } => {
                assert_eq!(expected, vec![Symbol::Eof]);
                assert_eq!(found, Symbol::RBrace);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let config = Config {
            max_depth: 8,
            ..Config::default()
        };
        let source = format!("print {}1{};", "(".repeat(10), ")".repeat(10));
        let err = Parser::with_config(&source, &config)
            .unwrap()
            .parse_program()
            .unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 8, .. }));

        let shallow = format!("print {}1{};", "(".repeat(3), ")".repeat(3));
        assert!(Parser::with_config(&shallow, &config)
            .unwrap()
            .parse_program()
            .is_ok());
    }
}
