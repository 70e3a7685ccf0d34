//! Debug trace sinks
//!
//! The lexer reports every emitted token to an optional [`TokenTrace`].
//! [`StderrTrace`] is what the `LEXDEBUG` toggle enables; [`RecordingTrace`]
//! keeps the lines in memory for tests and for the inspector's token pane.

use crate::parser::lexer::Token;
use std::cell::RefCell;
use std::rc::Rc;

/// Receives each token as the lexer produces it
pub trait TokenTrace {
    fn token(&mut self, token: &Token);
}

/// One trace line: `SYMBOL LINE COLUMN VALUE`
pub fn trace_line(token: &Token) -> String {
    format!(
        "{} {} {} {}",
        token.symbol, token.location.line, token.location.column, token.value
    )
}

/// Writes trace lines to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrTrace;

impl TokenTrace for StderrTrace {
    fn token(&mut self, token: &Token) {
        eprintln!("{}", trace_line(token));
    }
}

/// Records tokens in a buffer shared between clones
#[derive(Debug, Default, Clone)]
pub struct RecordingTrace {
    tokens: Rc<RefCell<Vec<Token>>>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.tokens.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.tokens.borrow().iter().map(trace_line).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.borrow().is_empty()
    }
}

impl TokenTrace for RecordingTrace {
    fn token(&mut self, token: &Token) {
        self.tokens.borrow_mut().push(token.clone());
    }
}
