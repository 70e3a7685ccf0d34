// Front-end configuration: trace toggles and strictness knobs

/// Default bound on statement/expression nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Environment variable enabling the token trace
pub const LEX_DEBUG_VAR: &str = "LEXDEBUG";

/// Environment variable enabling the parse-tree trace
pub const PARSE_DEBUG_VAR: &str = "PARSEDEBUG";

/// What to do with a statement that is a lone identifier (`x;`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BareIdentifier {
    /// Consume it and add nothing to the block
    #[default]
    Discard,
    /// Report a syntax error expecting `=` or `(`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Print every token as it is lexed
    pub lex_debug: bool,
    /// Print the rendered tree after a successful parse
    pub parse_debug: bool,
    /// Unterminated string literals become lexical errors
    pub strict_strings: bool,
    pub bare_identifier: BareIdentifier,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lex_debug: false,
            parse_debug: false,
            strict_strings: false,
            bare_identifier: BareIdentifier::Discard,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Defaults, with the trace toggles read from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, with the trace toggles read through `lookup`.
    /// A toggle is on when its variable is set to a non-empty value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        Config {
            lex_debug: enabled(LEX_DEBUG_VAR),
            parse_debug: enabled(PARSE_DEBUG_VAR),
            ..Config::default()
        }
    }

    /// Diagnose both lexical ambiguities instead of tolerating them
    pub fn strict(mut self) -> Self {
        self.strict_strings = true;
        self.bare_identifier = BareIdentifier::Reject;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.lex_debug);
        assert!(!config.strict_strings);
        assert_eq!(config.bare_identifier, BareIdentifier::Discard);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_lookup_requires_non_empty_value() {
        let config = Config::from_lookup(|key| match key {
            "LEXDEBUG" => Some("1".to_string()),
            "PARSEDEBUG" => Some(String::new()),
            _ => None,
        });
        assert!(config.lex_debug);
        assert!(!config.parse_debug);
    }

    #[test]
    fn test_strict() {
        let config = Config::default().strict();
        assert!(config.strict_strings);
        assert_eq!(config.bare_identifier, BareIdentifier::Reject);
    }
}
