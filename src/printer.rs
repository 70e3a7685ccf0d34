//! S-expression rendering of the AST
//!
//! [`render`] maps any subtree to a parenthesized prefix form such as
//! `(block (decl x (num 1)))`. Sequences (statements, parameters,
//! arguments) are joined by single spaces and render as `nil` when empty.
//! Rendering is pure: the same tree always produces the same text.

use crate::parser::ast::AstNode;
use std::fmt::{self, Write};

/// Render `node` and all of its children
pub fn render(node: &AstNode) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_node(&mut out, node);
    out
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

/// Pending output: a subtree still to be written, or literal text
enum Piece<'a> {
    Node(&'a AstNode),
    Text(&'a str),
}

fn write_node<W: Write>(out: &mut W, root: &AstNode) -> fmt::Result {
    // Explicit stack: operator chains nest once per operand
    let mut pending = vec![Piece::Node(root)];

    while let Some(piece) = pending.pop() {
        let node = match piece {
            Piece::Text(text) => {
                out.write_str(text)?;
                continue;
            }
            Piece::Node(node) => node,
        };

        match node {
            AstNode::Block { statements, .. } => {
                out.write_str("(block ")?;
                pending.push(Piece::Text(")"));
                push_sequence(out, &mut pending, statements)?;
            }
            AstNode::AssignmentStatement { name, expr, .. } => {
                write!(out, "(assignment {} ", name)?;
                pending.push(Piece::Text(")"));
                pending.push(Piece::Node(expr));
            }
            AstNode::DeclarationStatement { name, expr, .. } => {
                write!(out, "(decl {} ", name)?;
                pending.push(Piece::Text(")"));
                pending.push(Piece::Node(expr));
            }
            AstNode::PrintStatement { expr, .. } => {
                out.write_str("(print ")?;
                pending.push(Piece::Text(")"));
                pending.push(Piece::Node(expr));
            }
            AstNode::ReturnStatement { expr, .. } => match expr {
                Some(expr) => {
                    out.write_str("(return ")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(expr));
                }
                None => out.write_str("(return nil)")?,
            },
            AstNode::IfStatement {
                condition, body, ..
            } => {
                out.write_str("(if ")?;
                push_pair(&mut pending, condition, " ", body);
            }
            AstNode::WhileStatement {
                condition, body, ..
            } => {
                out.write_str("(while ")?;
                push_pair(&mut pending, condition, " ", body);
            }
            AstNode::BreakStatement { .. } => out.write_str("(break)")?,
            AstNode::ContinueStatement { .. } => out.write_str("(continue)")?,
            AstNode::FunctionStatement {
                name, params, body, ..
            } => {
                write!(out, "(func {} ", name)?;
                if params.is_empty() {
                    out.write_str("nil ")?;
                } else {
                    write!(out, "{} ", params.join(" "))?;
                }
                pending.push(Piece::Text(")"));
                pending.push(Piece::Node(body));
            }
            AstNode::CallExpression { name, args, .. } => {
                write!(out, "(call {} ", name)?;
                pending.push(Piece::Text(")"));
                push_sequence(out, &mut pending, args)?;
            }
            AstNode::BooleanExpression {
                left, op, right, ..
            } => {
                out.write_str("(bool ")?;
                push_binary(&mut pending, left, op.as_str(), right);
            }
            AstNode::LogicalOperand {
                left, op, right, ..
            } => {
                out.write_str("(logOp ")?;
                push_binary(&mut pending, left, op.as_str(), right);
            }
            AstNode::Term {
                left, op, right, ..
            } => {
                out.write_str("(term ")?;
                push_binary(&mut pending, left, op.as_str(), right);
            }
            AstNode::LogicalNotExpression { expr, .. } => {
                out.write_str("(not ")?;
                pending.push(Piece::Text(")"));
                pending.push(Piece::Node(expr));
            }
            AstNode::Identifier(value, _) => write!(out, "(id {})", value)?,
            AstNode::NumberLiteral(value, _) => write!(out, "(num {})", value)?,
            AstNode::StringLiteral(value, _) => write!(out, "(str {})", value)?,
            AstNode::BooleanLiteral(value, _) => write!(out, "({})", value)?,
        }
    }

    Ok(())
}

/// Queue `first SEP second)`; pieces pop in reverse order of pushing
fn push_pair<'a>(
    pending: &mut Vec<Piece<'a>>,
    first: &'a AstNode,
    separator: &'a str,
    second: &'a AstNode,
) {
    pending.push(Piece::Text(")"));
    pending.push(Piece::Node(second));
    pending.push(Piece::Text(separator));
    pending.push(Piece::Node(first));
}

fn push_binary<'a>(pending: &mut Vec<Piece<'a>>, left: &'a AstNode, op: &'a str, right: &'a AstNode) {
    pending.push(Piece::Text(")"));
    pending.push(Piece::Node(right));
    pending.push(Piece::Text(" "));
    pending.push(Piece::Text(op));
    pending.push(Piece::Text(" "));
    pending.push(Piece::Node(left));
}

/// Queue `nodes` joined by spaces, or write `nil` right away when empty
fn push_sequence<'a, W: Write>(
    out: &mut W,
    pending: &mut Vec<Piece<'a>>,
    nodes: &'a [AstNode],
) -> fmt::Result {
    if nodes.is_empty() {
        return out.write_str("nil");
    }
    for (i, node) in nodes.iter().enumerate().rev() {
        pending.push(Piece::Node(node));
        if i > 0 {
            pending.push(Piece::Text(" "));
        }
    }
    Ok(())
}
