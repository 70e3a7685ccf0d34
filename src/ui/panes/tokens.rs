//! Token stream pane

use super::{border_style, scroll_to_selection};
use crate::parser::lexer::{Symbol, Token};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn symbol_style(symbol: Symbol) -> Style {
    let style = Style::default().fg(DEFAULT_THEME.symbol(symbol));
    if symbol.is_keyword() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Render the token pane, one `SYMBOL LINE:COLUMN VALUE` row per token
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.muted));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders
    scroll_to_selection(scroll_offset, selected, visible_height, tokens.len());

    let lines: Vec<Line> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let mut spans = vec![
                Span::styled(format!("{:<8} ", token.symbol.as_str()), symbol_style(token.symbol)),
                Span::styled(
                    format!("{:>3}:{:<3} ", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.muted),
                ),
                Span::styled(token.value.clone(), Style::default().fg(DEFAULT_THEME.text)),
            ];
            if idx == selected {
                for span in &mut spans {
                    span.style = span.style.bg(DEFAULT_THEME.selection_bg);
                }
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
