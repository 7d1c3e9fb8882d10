//! Declaration nodes

use super::{Block, Expr};
use crate::common::Span;

/// Variable declaration, global or local
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: String,
    pub name: String,
    pub init: Option<Expr>,
    pub span: Span,
}

impl VarDecl {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, span: Span) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            init: None,
            span,
        }
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }

    /// Compact text of the initializer, if there is one
    pub fn init_text(&self) -> Option<String> {
        self.init.as_ref().map(Expr::text)
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub return_type: String,
    pub name: String,
    /// `None` when the source had an empty parameter list
    pub params: Option<Vec<Param>>,
    pub body: Option<Block>,
    pub span: Span,
}

impl FuncDecl {
    pub fn new(return_type: impl Into<String>, name: impl Into<String>, span: Span) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            params: None,
            body: None,
            span,
        }
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    pub fn params(&self) -> &[Param] {
        self.params.as_deref().unwrap_or_default()
    }

    pub fn statements(&self) -> &[super::Stmt] {
        self.body.as_ref().map(|b| b.stmts.as_slice()).unwrap_or_default()
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: String,
    pub name: String,
    pub span: Span,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, span: Span) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            span,
        }
    }
}
