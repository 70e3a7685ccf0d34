//! scrawl source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens), pulled one token at a time
//! - [`parse`]: The [`Parser`](parse::Parser) struct, errors and entry points
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Statements: `var`, assignment, `print`, `if`, `while`, `break`, `continue`,
//!   `fn`, `return`, call statements
//! - Expressions: `or`, `and`, comparisons, `+ -`, `* /`, `not`, calls,
//!   identifiers, numbers, strings, `true`/`false`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{parse, ParseError, Parser};
