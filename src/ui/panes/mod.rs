//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and a highlighted line
//! - [`tokens`]: The token stream in trace format, with a selection cursor
//! - [`tree`]: Indented outline of the parsed AST, with a selection cursor
//! - [`status`]: Status bar with keybindings and parse outcome
//!
//! Each pane module exports a primary `render_*` function. Scroll offsets live
//! in the [`App`](crate::ui::App) and are clamped here while rendering.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{outline, render_tree_pane, OutlineRow};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.focused_border)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.unfocused_border)
    }
}

/// Adjust `offset` so that `selected` lies within a window of `visible` rows
pub(crate) fn scroll_to_selection(offset: &mut usize, selected: usize, visible: usize, total: usize) {
    let visible = visible.max(1);
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + visible {
        *offset = selected + 1 - visible;
    }

    // Clamp scroll offset only if content exceeds visible area
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
