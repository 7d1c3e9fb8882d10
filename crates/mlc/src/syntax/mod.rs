//! Syntax tree handed to the analyzer by the front-end
//!
//! Node kinds form closed enums so every consumer has to match all of
//! them. The analyzer never mutates a tree.

mod decl;
mod expr;
mod stmt;

pub use decl::*;
pub use expr::*;
pub use stmt::*;

use crate::common::Span;

/// Root of a parsed source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.items.iter().filter_map(|item| match &item.kind {
            ItemKind::Function(func) => Some(func),
            _ => None,
        })
    }

    /// Variables declared directly under the program node
    pub fn globals(&self) -> impl Iterator<Item = &VarDecl> {
        self.items.iter().filter_map(|item| match &item.kind {
            ItemKind::Variable(var) => Some(var),
            _ => None,
        })
    }
}

/// Direct child of the program node
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub span: Span,
}

impl Item {
    pub fn new(kind: ItemKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// Global variable: int x = 5;
    Variable(VarDecl),

    /// Function definition: int f(int a) { ... }
    Function(FuncDecl),

    /// Top-level expression: foo();
    Expression(Expr),
}
