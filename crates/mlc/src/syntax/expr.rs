//! Expression nodes

use std::fmt;

use crate::common::Span;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Immediate sub-expressions, left to right
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::Identifier(_) => Vec::new(),
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Unary { operand, .. } => vec![operand.as_ref()],
            ExprKind::Assign { value, .. } => vec![value.as_ref()],
            ExprKind::Call { args, .. } => args.iter().collect(),
            ExprKind::Paren(inner) => vec![inner.as_ref()],
        }
    }

    /// Name of the called function if this node is a call
    pub fn call_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Call { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Source tokens of this expression concatenated without whitespace
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        match &self.kind {
            ExprKind::IntLiteral(text) | ExprKind::FloatLiteral(text) | ExprKind::StringLiteral(text) => {
                out.push_str(text);
            }
            ExprKind::BoolLiteral(value) => out.push_str(if *value { "true" } else { "false" }),
            ExprKind::Identifier(name) => out.push_str(name),
            ExprKind::Binary { op, left, right } => {
                left.write_text(out);
                out.push_str(op.symbol());
                right.write_text(out);
            }
            ExprKind::Unary { op, operand } => {
                out.push_str(op.symbol());
                operand.write_text(out);
            }
            ExprKind::Assign { target, value } => {
                out.push_str(target);
                out.push('=');
                value.write_text(out);
            }
            ExprKind::Call { name, args } => {
                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    arg.write_text(out);
                }
                out.push(')');
            }
            ExprKind::Paren(inner) => {
                out.push('(');
                inner.write_text(out);
                out.push(')');
            }
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal, kept as written: 42
    IntLiteral(String),

    /// Float literal, kept as written: 3.14
    FloatLiteral(String),

    /// String literal including its quotes: "hello"
    StringLiteral(String),

    /// true / false
    BoolLiteral(bool),

    /// Variable reference: x
    Identifier(String),

    /// Binary operation: a + b
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: -x, !flag
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Assignment: x = expr
    Assign {
        target: String,
        value: Box<Expr>,
    },

    /// Function call: foo(a, b)
    Call {
        name: String,
        args: Vec<Expr>,
    },

    /// Parenthesized expression: (a + b)
    Paren(Box<Expr>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}
