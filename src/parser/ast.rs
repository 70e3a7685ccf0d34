// AST (Abstract Syntax Tree) definitions for the scripting language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Operators allowed in a [`AstNode::BooleanExpression`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    // Comparison
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    // Logical
    And,
    Or,
}

impl BoolOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BoolOp::Eq => "==",
            BoolOp::Ne => "!=",
            BoolOp::Gt => ">",
            BoolOp::Ge => ">=",
            BoolOp::Lt => "<",
            BoolOp::Le => "<=",
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

/// Operators allowed in a [`AstNode::LogicalOperand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

impl AddOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AddOp::Add => "+",
            AddOp::Sub => "-",
        }
    }
}

/// Operators allowed in a [`AstNode::Term`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

impl MulOp {
    pub fn as_str(self) -> &'static str {
        match self {
            MulOp::Mul => "*",
            MulOp::Div => "/",
        }
    }
}

macro_rules! impl_op_display {
    ($($op:ty),*) => {
        $(impl fmt::Display for $op {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_op_display!(BoolOp, AddOp, MulOp);

/// The kind of an [`AstNode`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Block,
    AssignmentStatement,
    DeclarationStatement,
    PrintStatement,
    ReturnStatement,
    IfStatement,
    WhileStatement,
    BreakStatement,
    ContinueStatement,
    FunctionStatement,
    CallExpression,
    BooleanExpression,
    LogicalOperand,
    Term,
    LogicalNotExpression,
    Identifier,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
}

/// AST nodes representing statements and expressions
///
/// Nodes are built bottom-up by the parser and never mutated afterwards.
/// `If`, `While` and `Function` bodies are always [`AstNode::Block`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Block {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },

    // Statements
    AssignmentStatement {
        name: String,
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    DeclarationStatement {
        name: String,
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    PrintStatement {
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    ReturnStatement {
        expr: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    IfStatement {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },
    WhileStatement {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },
    BreakStatement {
        location: SourceLocation,
    },
    ContinueStatement {
        location: SourceLocation,
    },
    FunctionStatement {
        name: String,
        params: Vec<String>,
        body: Box<AstNode>,
        location: SourceLocation,
    },

    // Expressions
    CallExpression {
        name: String,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    BooleanExpression {
        left: Box<AstNode>,
        op: BoolOp,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    LogicalOperand {
        left: Box<AstNode>,
        op: AddOp,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    Term {
        left: Box<AstNode>,
        op: MulOp,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    LogicalNotExpression {
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    Identifier(String, SourceLocation),
    NumberLiteral(String, SourceLocation),
    StringLiteral(String, SourceLocation),
    BooleanLiteral(bool, SourceLocation),
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            AstNode::Block { location, .. } => location,
            AstNode::AssignmentStatement { location, .. } => location,
            AstNode::DeclarationStatement { location, .. } => location,
            AstNode::PrintStatement { location, .. } => location,
            AstNode::ReturnStatement { location, .. } => location,
            AstNode::IfStatement { location, .. } => location,
            AstNode::WhileStatement { location, .. } => location,
            AstNode::BreakStatement { location } => location,
            AstNode::ContinueStatement { location } => location,
            AstNode::FunctionStatement { location, .. } => location,
            AstNode::CallExpression { location, .. } => location,
            AstNode::BooleanExpression { location, .. } => location,
            AstNode::LogicalOperand { location, .. } => location,
            AstNode::Term { location, .. } => location,
            AstNode::LogicalNotExpression { location, .. } => location,
            AstNode::Identifier(_, loc) => loc,
            AstNode::NumberLiteral(_, loc) => loc,
            AstNode::StringLiteral(_, loc) => loc,
            AstNode::BooleanLiteral(_, loc) => loc,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Block { .. } => NodeKind::Block,
            AstNode::AssignmentStatement { .. } => NodeKind::AssignmentStatement,
            AstNode::DeclarationStatement { .. } => NodeKind::DeclarationStatement,
            AstNode::PrintStatement { .. } => NodeKind::PrintStatement,
            AstNode::ReturnStatement { .. } => NodeKind::ReturnStatement,
            AstNode::IfStatement { .. } => NodeKind::IfStatement,
            AstNode::WhileStatement { .. } => NodeKind::WhileStatement,
            AstNode::BreakStatement { .. } => NodeKind::BreakStatement,
            AstNode::ContinueStatement { .. } => NodeKind::ContinueStatement,
            AstNode::FunctionStatement { .. } => NodeKind::FunctionStatement,
            AstNode::CallExpression { .. } => NodeKind::CallExpression,
            AstNode::BooleanExpression { .. } => NodeKind::BooleanExpression,
            AstNode::LogicalOperand { .. } => NodeKind::LogicalOperand,
            AstNode::Term { .. } => NodeKind::Term,
            AstNode::LogicalNotExpression { .. } => NodeKind::LogicalNotExpression,
            AstNode::Identifier(..) => NodeKind::Identifier,
            AstNode::NumberLiteral(..) => NodeKind::NumberLiteral,
            AstNode::StringLiteral(..) => NodeKind::StringLiteral,
            AstNode::BooleanLiteral(..) => NodeKind::BooleanLiteral,
        }
    }

    /// Direct children of this node, in source order
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::Block { statements, .. } => statements.iter().collect(),
            AstNode::AssignmentStatement { expr, .. }
            | AstNode::DeclarationStatement { expr, .. }
            | AstNode::PrintStatement { expr, .. }
            | AstNode::LogicalNotExpression { expr, .. } => vec![expr.as_ref()],
            AstNode::ReturnStatement { expr, .. } => expr.iter().map(|e| e.as_ref()).collect(),
            AstNode::IfStatement {
                condition, body, ..
            }
            | AstNode::WhileStatement {
                condition, body, ..
            } => vec![condition.as_ref(), body.as_ref()],
            AstNode::FunctionStatement { body, .. } => vec![body.as_ref()],
            AstNode::CallExpression { args, .. } => args.iter().collect(),
            AstNode::BooleanExpression { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstNode::LogicalOperand { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstNode::Term { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstNode::BreakStatement { .. }
            | AstNode::ContinueStatement { .. }
            | AstNode::Identifier(..)
            | AstNode::NumberLiteral(..)
            | AstNode::StringLiteral(..)
            | AstNode::BooleanLiteral(..) => Vec::new(),
        }
    }

    /// Pre-order traversal, passing each node together with its depth (root = 0)
    pub fn walk<F: FnMut(&AstNode, usize)>(&self, f: &mut F) {
        let mut pending = vec![(self, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            f(node, depth);
            pending.extend(node.children().into_iter().rev().map(|c| (c, depth + 1)));
        }
    }

    /// Statements of a block node; empty for every other kind
    pub fn statements(&self) -> &[AstNode] {
        match self {
            AstNode::Block { statements, .. } => statements,
            _ => &[],
        }
    }
}

/// Leaf left behind in a box whose node was moved out during drop
fn detached() -> AstNode {
    AstNode::BreakStatement {
        location: SourceLocation::default(),
    }
}

impl AstNode {
    /// Move every direct child out of `self` onto `out`
    fn detach_children(&mut self, out: &mut Vec<AstNode>) {
        match self {
            AstNode::Block { statements, .. } => out.append(statements),
            AstNode::CallExpression { args, .. } => out.append(args),
            AstNode::AssignmentStatement { expr, .. }
            | AstNode::DeclarationStatement { expr, .. }
            | AstNode::PrintStatement { expr, .. }
            | AstNode::LogicalNotExpression { expr, .. } => {
                out.push(std::mem::replace(expr.as_mut(), detached()));
            }
            AstNode::ReturnStatement { expr, .. } => {
                if let Some(expr) = expr.take() {
                    out.push(*expr);
                }
            }
            AstNode::FunctionStatement { body, .. } => {
                out.push(std::mem::replace(body.as_mut(), detached()));
            }
            AstNode::IfStatement {
                condition, body, ..
            }
            | AstNode::WhileStatement {
                condition, body, ..
            } => {
                out.push(std::mem::replace(condition.as_mut(), detached()));
                out.push(std::mem::replace(body.as_mut(), detached()));
            }
            AstNode::BooleanExpression { left, right, .. }
            | AstNode::LogicalOperand { left, right, .. }
            | AstNode::Term { left, right, .. } => {
                out.push(std::mem::replace(left.as_mut(), detached()));
                out.push(std::mem::replace(right.as_mut(), detached()));
            }
            AstNode::BreakStatement { .. }
            | AstNode::ContinueStatement { .. }
            | AstNode::Identifier(..)
            | AstNode::NumberLiteral(..)
            | AstNode::StringLiteral(..)
            | AstNode::BooleanLiteral(..) => {}
        }
    }
}

// Operator chains nest as deep as they are long, so children are released
// from a work list instead of by recursive drop glue.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}
