//! Source code pane rendering with syntax highlighting
//!
//! Displays the program with line numbers, keyword/literal coloring and one
//! highlighted line: the line of the selected token or node, or the line of
//! the parse error.

use super::{border_style, scroll_to_selection};
use crate::parser::lexer::Symbol;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Word-level highlighting; keyword spelling comes from the lexer's table
fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Strings, up to the next unescaped quote or end of line
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(word_span(std::mem::take(&mut current_word), false));
            }
            let mut end = i + 1;
            while end < chars.len() && !(chars[end] == '"' && chars[end - 1] != '\\') {
                end += 1;
            }
            end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.literal_string),
            ));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                spans.push(word_span(std::mem::take(&mut current_word), c == '('));
            }

            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.punctuation),
                _ => Style::default().fg(DEFAULT_THEME.text),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(word_span(current_word, false));
    }

    Line::from(spans)
}

fn word_span(word: String, is_call: bool) -> Span<'static> {
    let style = if Symbol::keyword(&word).is_some() {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.literal_number)
    } else if is_call {
        Style::default().fg(DEFAULT_THEME.callee)
    } else {
        Style::default().fg(DEFAULT_THEME.text)
    };
    Span::styled(word, style)
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    highlighted_line: Option<usize>,
    is_error: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let target = highlighted_line
        .filter(|&line| line > 0 && line <= total_lines)
        .map(|line| line - 1)
        .unwrap_or_else(|| (*scroll_offset).min(total_lines.saturating_sub(1)));
    scroll_to_selection(scroll_offset, target, visible_height, total_lines);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = Some(line_num) == highlighted_line;
            let line_num_str = format!("{:4} ", line_num);

            let mut content_line = highlight_source_code(line);

            let num_style = if is_current && is_error {
                for span in &mut content_line.spans {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White) // White text on red for visibility
                        .add_modifier(Modifier::BOLD);
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                for span in &mut content_line.spans {
                    span.style = span.style.bg(DEFAULT_THEME.selection_bg);
                }
                Style::default()
                    .fg(DEFAULT_THEME.focused_border)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.muted) // Line numbers
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
