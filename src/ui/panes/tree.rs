//! AST outline pane
//!
//! The tree is flattened into one [`OutlineRow`] per node (pre-order), each
//! indented by its depth and labelled with its kind and its own payload
//! (name, operator or literal value), never its children.

use super::{border_style, scroll_to_selection};
use crate::parser::ast::{AstNode, NodeKind, SourceLocation};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub depth: usize,
    pub kind: NodeKind,
    pub detail: String,
    pub location: SourceLocation,
}

fn detail(node: &AstNode) -> String {
    match node {
        AstNode::Block { statements, .. } => format!("{} statement(s)", statements.len()),
        AstNode::AssignmentStatement { name, .. } | AstNode::DeclarationStatement { name, .. } => {
            name.clone()
        }
        AstNode::FunctionStatement { name, params, .. } => format!("{}({})", name, params.join(", ")),
        AstNode::CallExpression { name, args, .. } => format!("{}/{}", name, args.len()),
        AstNode::BooleanExpression { op, .. } => op.to_string(),
        AstNode::LogicalOperand { op, .. } => op.to_string(),
        AstNode::Term { op, .. } => op.to_string(),
        AstNode::Identifier(value, _)
        | AstNode::NumberLiteral(value, _)
        | AstNode::StringLiteral(value, _) => value.clone(),
        AstNode::BooleanLiteral(value, _) => value.to_string(),
        AstNode::PrintStatement { .. }
        | AstNode::ReturnStatement { .. }
        | AstNode::IfStatement { .. }
        | AstNode::WhileStatement { .. }
        | AstNode::BreakStatement { .. }
        | AstNode::ContinueStatement { .. }
        | AstNode::LogicalNotExpression { .. } => String::new(),
    }
}

/// Flatten `root` into outline rows
pub fn outline(root: &AstNode) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    root.walk(&mut |node, depth| {
        rows.push(OutlineRow {
            depth,
            kind: node.kind(),
            detail: detail(node),
            location: *node.location(),
        })
    });
    rows
}

/// Render the AST pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[OutlineRow],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if rows.is_empty() {
        let paragraph = Paragraph::new("(no tree: parse failed)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    scroll_to_selection(scroll_offset, selected, visible_height, rows.len());

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(format!("{:?}", row.kind), Style::default().fg(DEFAULT_THEME.node_kind)),
                Span::raw(" "),
                Span::styled(row.detail.clone(), Style::default().fg(DEFAULT_THEME.text)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse;

    #[test]
    fn test_outline_rows() {
        let tree = parse("fn add(a, b) { return a + b; }").unwrap();
        let rows = outline(&tree);

        let summary: Vec<(usize, NodeKind, &str)> = rows
            .iter()
            .map(|r| (r.depth, r.kind, r.detail.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, NodeKind::Block, "1 statement(s)"),
                (1, NodeKind::FunctionStatement, "add(a, b)"),
                (2, NodeKind::Block, "1 statement(s)"),
                (3, NodeKind::ReturnStatement, ""),
                (4, NodeKind::LogicalOperand, "+"),
                (5, NodeKind::Identifier, "a"),
                (5, NodeKind::Identifier, "b"),
            ]
        );
        assert_eq!(rows[4].location, SourceLocation::new(1, 25));
    }
}
