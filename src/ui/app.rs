//! Inspector application state and logic

use crate::config::Config;
use crate::parser::ast::AstNode;
use crate::parser::lexer::{Lexer, Token};
use crate::parser::parse::{ParseError, Parser};
use crate::trace::RecordingTrace;
use crate::ui::panes::{self, OutlineRow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Everything the inspector shows about one source file
#[derive(Debug, Clone)]
pub struct Inspection {
    pub source: String,
    /// Tokens lexed before parsing finished or stopped
    pub tokens: Vec<Token>,
    pub tree: Option<AstNode>,
    pub error: Option<ParseError>,
}

impl Inspection {
    /// Lex and parse `source`, recording every token the parser pulled
    pub fn run(source: &str, config: &Config) -> Self {
        let trace = RecordingTrace::new();
        let lexer = Lexer::new(source)
            .with_strict_strings(config.strict_strings)
            .with_trace(Box::new(trace.clone()));

        let result = Parser::from_lexer(lexer, config).and_then(|mut parser| parser.parse_program());
        let (tree, error) = match result {
            Ok(tree) => (Some(tree), None),
            Err(err) => (None, Some(err)),
        };

        Inspection {
            source: source.to_string(),
            tokens: trace.tokens(),
            tree,
            error,
        }
    }
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    pub inspection: Inspection,

    /// Flattened tree, one row per node
    pub outline: Vec<OutlineRow>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Selection cursors
    pub selected_token: usize,
    pub selected_node: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(inspection: Inspection) -> Self {
        let outline = inspection
            .tree
            .as_ref()
            .map(panes::outline)
            .unwrap_or_default();
        let focused_pane = if inspection.error.is_some() {
            FocusedPane::Source
        } else {
            FocusedPane::Tree
        };

        App {
            inspection,
            outline,
            focused_pane,
            selected_token: 0,
            selected_node: 0,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Source line to highlight: the error line, else the selection in the focused pane
    pub fn highlighted_line(&self) -> Option<usize> {
        if let Some(err) = &self.inspection.error {
            return Some(err.location().line);
        }
        match self.focused_pane {
            FocusedPane::Source => None,
            FocusedPane::Tokens => self
                .inspection
                .tokens
                .get(self.selected_token)
                .map(|t| t.location.line),
            FocusedPane::Tree => self.outline.get(self.selected_node).map(|r| r.location.line),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source | Tokens | Tree
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Percentage(30),
            ])
            .split(main_chunks[0]);

        let highlighted_line = self.highlighted_line();
        let error_text = self.inspection.error.as_ref().map(|e| e.to_string());

        panes::render_source_pane(
            frame,
            columns[0],
            &self.inspection.source,
            highlighted_line,
            error_text.is_some(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tokens_pane(
            frame,
            columns[1],
            &self.inspection.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[2],
            &self.outline,
            self.selected_node,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.inspection.tokens.len(),
            self.outline.len(),
            error_text.as_deref(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::Enter => {
                self.move_selection(isize::MAX);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.move_selection(isize::MIN);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.focused_pane {
            FocusedPane::Source => {
                // Source has no cursor, only a scroll offset
                self.source_scroll = step(self.source_scroll, delta, usize::MAX);
                return;
            }
            FocusedPane::Tokens => (&mut self.selected_token, self.inspection.tokens.len()),
            FocusedPane::Tree => (&mut self.selected_node, self.outline.len()),
        };
        if len == 0 {
            return;
        }
        *selected = step(*selected, delta, len - 1);
    }
}

/// `value + delta`, clamped to `0..=max`
fn step(value: usize, delta: isize, max: usize) -> usize {
    let moved = if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as usize)
    };
    moved.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_inspection_of_valid_program() {
        let inspection = Inspection::run("var x = 1;\nprint x;", &Config::default());

        assert!(inspection.error.is_none());
        assert!(inspection.tree.is_some());
        // var x = 1 ; print x ; eof
        assert_eq!(inspection.tokens.len(), 9);
    }

    #[test]
    fn test_inspection_stops_at_error() {
        let inspection = Inspection::run("print 1;\nprint (;\nprint 3;", &Config::default());

        assert!(inspection.tree.is_none());
        let err = inspection.error.as_ref().unwrap();
        assert_eq!(err.location().line, 2);
        // nothing after the offending ';' was lexed
        assert_eq!(inspection.tokens.last().unwrap().value, ";");

        let app = App::new(inspection);
        assert!(app.outline.is_empty());
        assert_eq!(app.focused_pane, FocusedPane::Source);
        assert_eq!(app.highlighted_line(), Some(2));
    }

    #[test]
    fn test_selection_follows_keys() {
        let mut app = App::new(Inspection::run("print 1;\nprint 2;", &Config::default()));
        assert_eq!(app.focused_pane, FocusedPane::Tree);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        // block, print, num, print
        assert_eq!(app.selected_node, 3);
        assert_eq!(app.highlighted_line(), Some(2));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_node, app.outline.len() - 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.selected_node, 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_node, 0);
    }

    #[test]
    fn test_focus_cycle_and_quit() {
        let mut app = App::new(Inspection::run("print 1;", &Config::default()));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, 1);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
