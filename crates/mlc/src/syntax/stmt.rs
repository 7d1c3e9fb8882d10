//! Statement nodes

use super::{Expr, VarDecl};
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The variable declaration held directly by this statement, if any
    pub fn declaration(&self) -> Option<&VarDecl> {
        match &self.kind {
            StmtKind::Declaration(var) => Some(var),
            _ => None,
        }
    }

    /// Expressions held directly by this statement (not by nested blocks)
    pub fn expressions(&self) -> Vec<&Expr> {
        match &self.kind {
            StmtKind::Declaration(var) => var.init.iter().collect(),
            StmtKind::Expr(expr) => vec![expr],
            StmtKind::If { condition, .. } | StmtKind::While { condition, .. } => vec![condition],
            StmtKind::Return(value) => value.iter().collect(),
            StmtKind::Block(_) => Vec::new(),
        }
    }

    /// Blocks nested directly inside this statement
    pub fn blocks(&self) -> Vec<&Block> {
        match &self.kind {
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => std::iter::once(then_branch).chain(else_branch.iter()).collect(),
            StmtKind::While { body, .. } => vec![body],
            StmtKind::Block(block) => vec![block],
            StmtKind::Declaration(_) | StmtKind::Expr(_) | StmtKind::Return(_) => Vec::new(),
        }
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        match &self.kind {
            StmtKind::Declaration(var) => {
                out.push_str(&var.ty);
                out.push_str(&var.name);
                if let Some(init) = &var.init {
                    out.push('=');
                    init.write_text(out);
                }
                out.push(';');
            }
            StmtKind::Expr(expr) => {
                expr.write_text(out);
                out.push(';');
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push_str("if(");
                condition.write_text(out);
                out.push(')');
                then_branch.write_text(out);
                if let Some(else_branch) = else_branch {
                    out.push_str("else");
                    else_branch.write_text(out);
                }
            }
            StmtKind::While { condition, body } => {
                out.push_str("while(");
                condition.write_text(out);
                out.push(')');
                body.write_text(out);
            }
            StmtKind::Return(value) => {
                out.push_str("return");
                if let Some(value) = value {
                    value.write_text(out);
                }
                out.push(';');
            }
            StmtKind::Block(block) => block.write_text(out),
        }
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Local variable declaration: int x = 1;
    Declaration(VarDecl),

    /// Expression statement: expr;
    Expr(Expr),

    /// if (cond) { ... } [else { ... }]
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },

    /// while (cond) { ... }
    While { condition: Expr, body: Block },

    /// return [expr];
    Return(Option<Expr>),

    /// Nested block: { ... }
    Block(Block),
}

/// Braced statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }

    /// Source tokens of the block concatenated without whitespace
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        out.push('{');
        for stmt in &self.stmts {
            stmt.write_text(out);
        }
        out.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ExprKind;

    #[test]
    fn test_block_text() {
        let line = Span::on_line(1);
        let local = VarDecl::new("int", "r", line).with_init(Expr::new(ExprKind::IntLiteral("1".into()), line));
        let ret = Expr::new(ExprKind::Identifier("r".into()), line);
        let block = Block::new(
            vec![
                Stmt::new(StmtKind::Declaration(local), line),
                Stmt::new(StmtKind::Return(Some(ret)), line),
            ],
            line,
        );
        assert_eq!(block.text(), "{intr=1;returnr;}");
    }
}
