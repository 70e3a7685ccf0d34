//! Inspector colors

use crate::parser::lexer::Symbol;
use ratatui::style::Color;

/// Colors by role: token categories, panes and diagnostics
pub struct Theme {
    pub text: Color,
    pub punctuation: Color,
    pub keyword: Color,
    pub literal_string: Color,
    pub literal_number: Color,
    pub callee: Color,
    pub node_kind: Color,
    pub muted: Color,
    pub ok: Color,
    pub error: Color,
    pub focused_border: Color,
    pub unfocused_border: Color,
    pub selection_bg: Color,
}

impl Theme {
    /// Foreground for a token of the given category
    pub fn symbol(&self, symbol: Symbol) -> Color {
        match symbol {
            Symbol::Id => self.text,
            Symbol::Number => self.literal_number,
            Symbol::String => self.literal_string,
            Symbol::Eof => self.muted,
            s if s.is_keyword() => self.keyword,
            _ => self.punctuation,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    punctuation: Color::Rgb(137, 180, 250),
    keyword: Color::Rgb(203, 166, 247),
    literal_string: Color::Rgb(166, 227, 161),
    literal_number: Color::Rgb(250, 179, 135),
    callee: Color::Rgb(249, 226, 175),
    node_kind: Color::Rgb(148, 226, 213),
    muted: Color::Rgb(108, 112, 134),
    ok: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    focused_border: Color::Rgb(249, 226, 175),
    unfocused_border: Color::Rgb(88, 91, 112),
    selection_bg: Color::Rgb(49, 50, 68),
};
