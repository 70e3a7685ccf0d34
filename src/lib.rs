//! # Introduction
//!
//! scrawl is the front end of an interpreter for a small imperative
//! scripting language. It lexes and parses source text into an AST and can
//! render that AST as an S-expression for inspection.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Printer
//! ```
//!
//! 1. [`parser`]: pulls tokens from the lexer and builds the AST.
//! 2. [`printer`]: renders any subtree as `(block (decl x (num 1)))`.
//! 3. [`trace`]: token trace sinks behind the `LEXDEBUG` toggle.
//! 4. [`config`]: trace toggles, strictness options and the nesting bound.
//! 5. [`ui`]: ratatui inspector over source, tokens and tree; not part of
//!    the stable library API.
//!
//! ## Example
//!
//! ```
//! let tree = scrawl::parser::parse("var x = 1 + 2;").unwrap();
//! assert_eq!(
//!     scrawl::printer::render(&tree),
//!     "(block (decl x (logOp (num 1) + (num 2))))"
//! );
//! ```

pub mod config;
pub mod parser;
pub mod printer;
pub mod trace;
pub mod ui;
