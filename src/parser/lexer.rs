//! Lexer (tokenizer) for scrawl source code
//!
//! Converts raw source text into positioned [`Token`]s, one per call to
//! [`Lexer::lex`]. The parser pulls tokens on demand, so the lexer never
//! materializes the whole stream unless [`Lexer::tokenize`] is used.
//!
//! Keywords are recognized by scanning a whole word and looking it up in a
//! keyword table, so a keyword-shaped prefix of a longer name (`iffy`,
//! `variable`, `nothing`) lexes as a single identifier.

use super::ast::SourceLocation;
use crate::trace::TokenTrace;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    // Keywords
    Var,
    Print,
    If,
    While,
    Break,
    Continue,
    Fn,
    Return,
    True,
    False,
    And,
    Or,
    Not,

    // Multi-character operators
    EqEq,  // ==
    NotEq, // !=
    Ge,    // >=
    Le,    // <=

    // Single-character operators and punctuation
    Eq,        // =
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Lt,        // <
    Gt,        // >
    Comma,     // ,
    Semicolon, // ;

    // Open classes
    Id,
    Number,
    String,

    Eof,
}

impl Symbol {
    /// Spelling used in diagnostics and in the token trace.
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Var => "var",
            Symbol::Print => "print",
            Symbol::If => "if",
            Symbol::While => "while",
            Symbol::Break => "break",
            Symbol::Continue => "continue",
            Symbol::Fn => "fn",
            Symbol::Return => "return",
            Symbol::True => "true",
            Symbol::False => "false",
            Symbol::And => "and",
            Symbol::Or => "or",
            Symbol::Not => "not",
            Symbol::EqEq => "==",
            Symbol::NotEq => "!=",
            Symbol::Ge => ">=",
            Symbol::Le => "<=",
            Symbol::Eq => "=",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Comma => ",",
            Symbol::Semicolon => ";",
            Symbol::Id => "id",
            Symbol::Number => "number",
            Symbol::String => "string",
            Symbol::Eof => "eof",
        }
    }

    /// Look up a keyword by its spelling.
    pub fn keyword(word: &str) -> Option<Symbol> {
        keywords().get(word).copied()
    }

    pub fn is_keyword(self) -> bool {
        Symbol::keyword(self.as_str()) == Some(self)
    }

    /// Single-character operator or punctuation for `ch`, if any.
    fn single_char(ch: char) -> Option<Symbol> {
        let symbol = match ch {
            '=' => Symbol::Eq,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            '{' => Symbol::LBrace,
            '}' => Symbol::RBrace,
            '<' => Symbol::Lt,
            '>' => Symbol::Gt,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            _ => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const KEYWORDS: [Symbol; 13] = [
    Symbol::Var,
    Symbol::Print,
    Symbol::If,
    Symbol::While,
    Symbol::Break,
    Symbol::Continue,
    Symbol::Fn,
    Symbol::Return,
    Symbol::True,
    Symbol::False,
    Symbol::Not,
    Symbol::And,
    Symbol::Or,
];

fn keywords() -> &'static FxHashMap<&'static str, Symbol> {
    static TABLE: OnceLock<FxHashMap<&'static str, Symbol>> = OnceLock::new();
    TABLE.get_or_init(|| KEYWORDS.iter().map(|&kw| (kw.as_str(), kw)).collect())
}

/// A lexeme together with its category and the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub symbol: Symbol,
    pub value: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(symbol: Symbol, value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            symbol,
            value: value.into(),
            location,
        }
    }

    pub fn is(&self, symbol: Symbol) -> bool {
        self.symbol == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Symbol::Id => write!(f, "identifier '{}'", self.value),
            Symbol::Number => write!(f, "number {}", self.value),
            Symbol::String => write!(f, "string \"{}\"", self.value),
            Symbol::Eof => write!(f, "end of file"),
            other => write!(f, "'{}'", other),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No lexical rule matches this character
    UnexpectedCharacter { ch: char, location: SourceLocation },

    /// End of input inside a string literal (only raised in strict mode)
    UnterminatedString { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. } => *location,
            LexError::UnterminatedString { location } => *location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "Lexer error at line {}, column {}: ",
            location.line, location.column
        )?;
        match self {
            LexError::UnexpectedCharacter { ch, .. } => {
                write!(f, "unrecognized character '{}'", ch.escape_debug())
            }
            LexError::UnterminatedString { .. } => write!(f, "unterminated string literal"),
        }
    }
}

impl std::error::Error for LexError {}

/// Pull-based lexer over an in-memory source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    strict_strings: bool,
    trace: Option<Box<dyn TokenTrace>>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            strict_strings: false,
            trace: None,
        }
    }

    /// Report unterminated string literals as errors instead of truncated tokens.
    pub fn with_strict_strings(mut self, strict: bool) -> Self {
        self.strict_strings = strict;
        self
    }

    /// Report every emitted token to `trace`.
    pub fn with_trace(mut self, trace: Box<dyn TokenTrace>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Whether unconsumed input remains (whitespace included)
    pub fn has_more(&self) -> bool {
        self.position < self.input.len()
    }

    /// Consume and return the next token.
    ///
    /// Once the input is exhausted every call returns an `eof` token.
    pub fn lex(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(ch) = self.peek() else {
                return Ok(self.emit(Symbol::Eof, "eof".to_string(), self.current_location()));
            };

            let loc = self.current_location();
            match ch {
                ' ' | '\t' => {
                    self.advance();
                }
                '\r' => {
                    // carriage returns take no column
                    self.position += 1;
                }
                '\n' => {
                    self.advance();
                }
                'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(loc)),
                '0'..='9' => return Ok(self.number_literal(loc)),
                '"' => return self.string_literal(loc),
                '=' | '!' | '>' | '<' if self.peek_ahead(1) == Some('=') => {
                    let symbol = match ch {
                        '=' => Symbol::EqEq,
                        '!' => Symbol::NotEq,
                        '>' => Symbol::Ge,
                        _ => Symbol::Le,
                    };
                    self.advance();
                    self.advance();
                    return Ok(self.emit(symbol, symbol.as_str().to_string(), loc));
                }
                _ => {
                    let Some(symbol) = Symbol::single_char(ch) else {
                        return Err(LexError::UnexpectedCharacter { ch, location: loc });
                    };
                    self.advance();
                    return Ok(self.emit(symbol, ch.to_string(), loc));
                }
            }
        }
    }

    /// Tokenize the remaining input, up to and including the first `eof`
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.lex()?;
            let done = token.is(Symbol::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    fn emit(&mut self, symbol: Symbol, value: String, location: SourceLocation) -> Token {
        let token = Token::new(symbol, value, location);
        if let Some(trace) = self.trace.as_mut() {
            trace.token(&token);
        }
        token
    }

    /// Scan a word and classify it as keyword or identifier
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut word = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match Symbol::keyword(&word) {
            Some(keyword) => self.emit(keyword, word, loc),
            None => self.emit(Symbol::Id, word, loc),
        }
    }

    /// Unsigned digit run; no sign, no fraction
    fn number_literal(&mut self, loc: SourceLocation) -> Token {
        let mut digits = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        self.emit(Symbol::Number, digits, loc)
    }

    /// Raw characters up to the next quote not preceded by a backslash.
    /// The backslash itself is kept; no escapes are interpreted.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut text = String::new();
        let mut prev = '\0';

        loop {
            let Some(ch) = self.advance() else {
                if self.strict_strings {
                    return Err(LexError::UnterminatedString { location: loc });
                }
                break;
            };
            if ch == '"' && prev != '\\' {
                break;
            }
            text.push(ch);
            prev = ch;
        }

        Ok(self.emit(Symbol::String, text, loc))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RecordingTrace;

    fn symbols(source: &str) -> Vec<Symbol> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .iter()
            .map(|t| t.symbol)
            .collect()
    }

    #[test]
    fn test_if_statement_tokens() {
        let tokens = Lexer::new("if a >= 3 { }").tokenize().unwrap();

        let syms: Vec<Symbol> = tokens.iter().map(|t| t.symbol).collect();
        assert_eq!(
            syms,
            vec![
                Symbol::If,
                Symbol::Id,
                Symbol::Ge,
                Symbol::Number,
                Symbol::LBrace,
                Symbol::RBrace,
                Symbol::Eof,
            ]
        );
        assert_eq!(tokens[1].value, "a");
        assert_eq!(tokens[3].value, "3");
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            symbols("== != >= <= = < > + - * / ( ) { } , ;"),
            vec![
                Symbol::EqEq,
                Symbol::NotEq,
                Symbol::Ge,
                Symbol::Le,
                Symbol::Eq,
                Symbol::Lt,
                Symbol::Gt,
                Symbol::Plus,
                Symbol::Minus,
                Symbol::Star,
                Symbol::Slash,
                Symbol::LParen,
                Symbol::RParen,
                Symbol::LBrace,
                Symbol::RBrace,
                Symbol::Comma,
                Symbol::Semicolon,
                Symbol::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_without_spaces() {
        assert_eq!(
            symbols("a<=b==c"),
            vec![
                Symbol::Id,
                Symbol::Le,
                Symbol::Id,
                Symbol::EqEq,
                Symbol::Id,
                Symbol::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            symbols("var print if while break continue fn return true false and or not"),
            vec![
                Symbol::Var,
                Symbol::Print,
                Symbol::If,
                Symbol::While,
                Symbol::Break,
                Symbol::Continue,
                Symbol::Fn,
                Symbol::Return,
                Symbol::True,
                Symbol::False,
                Symbol::And,
                Symbol::Or,
                Symbol::Not,
                Symbol::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = Lexer::new("iffy variable nothing order fn_1").tokenize().unwrap();

        for token in &tokens[..5] {
            assert_eq!(token.symbol, Symbol::Id, "{} should be an identifier", token.value);
        }
        assert_eq!(tokens[4].value, "fn_1");
    }

    #[test]
    fn test_identifier_and_number() {
        let tokens = Lexer::new("_x9 42").tokenize().unwrap();
        assert_eq!(tokens[0].symbol, Symbol::Id);
        assert_eq!(tokens[0].value, "_x9");
        assert_eq!(tokens[1].symbol, Symbol::Number);
        assert_eq!(tokens[1].value, "42");
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = Lexer::new("12ab").tokenize().unwrap();
        assert_eq!(tokens[0].symbol, Symbol::Number);
        assert_eq!(tokens[0].value, "12");
        assert_eq!(tokens[1].symbol, Symbol::Id);
        assert_eq!(tokens[1].value, "ab");
    }

    #[test]
    fn test_string_literal_keeps_escape() {
        let tokens = Lexer::new(r#"print "say \"hi\"";"#).tokenize().unwrap();

        assert_eq!(tokens[1].symbol, Symbol::String);
        assert_eq!(tokens[1].value, r#"say \"hi\""#);
        assert_eq!(tokens[2].symbol, Symbol::Semicolon);
    }

    #[test]
    fn test_unterminated_string_is_truncated() {
        let tokens = Lexer::new("\"abc").tokenize().unwrap();
        assert_eq!(tokens[0].symbol, Symbol::String);
        assert_eq!(tokens[0].value, "abc");
        assert_eq!(tokens[1].symbol, Symbol::Eof);
    }

    #[test]
    fn test_unterminated_string_strict() {
        let err = Lexer::new("x \"abc")
            .with_strict_strings(true)
            .tokenize()
            .unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                location: SourceLocation::new(1, 3)
            }
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("var x = 1;\n  @").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                ch: '@',
                location: SourceLocation::new(2, 3)
            }
        );
        assert_eq!(
            err.to_string(),
            "Lexer error at line 2, column 3: unrecognized character '@'"
        );
    }

    #[test]
    fn test_lone_bang_is_an_error() {
        let err = Lexer::new("!x").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { ch: '!', .. }));
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("var x = 10;\n\tprint x;").tokenize().unwrap();

        let positions: Vec<(usize, usize)> = tokens
            .iter()
            .map(|t| (t.location.line, t.location.column))
            .collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 11), (2, 2), (2, 8), (2, 9), (2, 10)]
        );
    }

    #[test]
    fn test_newline_inside_string_advances_line() {
        let tokens = Lexer::new("print \"a\nb\" x;\ny").tokenize().unwrap();

        assert_eq!(tokens[1].value, "a\nb");
        assert_eq!(tokens[1].location, SourceLocation::new(1, 7));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 4));
        assert_eq!(tokens[4].location, SourceLocation::new(3, 1));
    }

    #[test]
    fn test_carriage_return_takes_no_column() {
        let tokens = Lexer::new("a\r\n\rb").tokenize().unwrap();
        assert_eq!(tokens[1].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_eof_is_repeated() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.has_more());
        assert_eq!(lexer.lex().unwrap().symbol, Symbol::Id);
        assert!(!lexer.has_more());
        for _ in 0..3 {
            let token = lexer.lex().unwrap();
            assert_eq!(token.symbol, Symbol::Eof);
            assert_eq!(token.value, "eof");
        }
    }

    #[test]
    fn test_has_more_counts_whitespace() {
        let mut lexer = Lexer::new("x   ");
        lexer.lex().unwrap();
        assert!(lexer.has_more());
        assert_eq!(lexer.lex().unwrap().symbol, Symbol::Eof);
        assert!(!lexer.has_more());
    }

    #[test]
    fn test_trace_sees_every_token() {
        let trace = RecordingTrace::new();
        let mut lexer = Lexer::new("print 1;").with_trace(Box::new(trace.clone()));
        lexer.tokenize().unwrap();

        assert_eq!(
            trace.lines(),
            vec!["print 1 1 print", "number 1 7 1", "; 1 8 ;", "eof 1 9 eof"]
        );
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(Symbol::keyword("while"), Some(Symbol::While));
        assert_eq!(Symbol::keyword("whilst"), None);
        assert!(Symbol::Not.is_keyword());
        assert!(!Symbol::EqEq.is_keyword());
    }
}
