//! Call resolution
//!
//! Every call must name a declared function. Resolution is by bare name:
//! argument count and types are not compared with any signature.

use std::ops::ControlFlow;

use crate::common::{DiagnosticId, Diagnostics, ErrorKind};
use crate::syntax::{Block, Expr, FuncDecl};

use super::scope::GlobalScope;

/// How far below a visited expression the checker looks for calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallDepth {
    /// The expression itself and its immediate operands
    #[default]
    Shallow,
    /// Every nested sub-expression, call arguments included
    Deep,
}

pub struct CallChecker<'g, 'd> {
    global: &'g GlobalScope,
    diagnostics: &'d mut Diagnostics,
    depth: CallDepth,
    halt_on_undefined: bool,
}

impl<'g, 'd> CallChecker<'g, 'd> {
    pub fn new(global: &'g GlobalScope, diagnostics: &'d mut Diagnostics, depth: CallDepth) -> Self {
        Self {
            global,
            diagnostics,
            depth,
            halt_on_undefined: false,
        }
    }

    /// Stop at the first undefined call instead of reporting them all
    pub fn halt_on_undefined(mut self, halt: bool) -> Self {
        self.halt_on_undefined = halt;
        self
    }

    /// Check one expression site.
    ///
    /// Breaks with the id of the recorded diagnostic when halting is on and
    /// an undefined call was found. Nothing already recorded is touched.
    pub fn check_expr(&mut self, expr: &Expr) -> ControlFlow<DiagnosticId> {
        let mut candidates = Vec::new();
        match self.depth {
            CallDepth::Shallow => {
                candidates.push(expr);
                candidates.extend(expr.children());
            }
            CallDepth::Deep => collect_all(expr, &mut candidates),
        }

        for node in candidates {
            let Some(name) = node.call_name() else { continue };
            if self.global.has_function_named(name) {
                continue;
            }

            let id = self.diagnostics.record_at(
                ErrorKind::UndefinedFunctionCall,
                format!("function '{}' is called but never defined", name),
                node.span,
            );
            if self.halt_on_undefined {
                return ControlFlow::Break(id);
            }
        }

        ControlFlow::Continue(())
    }

    /// Check every expression site in a function body, nested blocks included
    pub fn check_function(&mut self, func: &FuncDecl) -> ControlFlow<DiagnosticId> {
        match &func.body {
            Some(body) => self.check_block(body),
            None => ControlFlow::Continue(()),
        }
    }

    fn check_block(&mut self, block: &Block) -> ControlFlow<DiagnosticId> {
        for stmt in &block.stmts {
            for expr in stmt.expressions() {
                self.check_expr(expr)?;
            }
            for nested in stmt.blocks() {
                self.check_block(nested)?;
            }
        }
        ControlFlow::Continue(())
    }
}

/// Pre-order walk of an expression tree
fn collect_all<'e>(expr: &'e Expr, out: &mut Vec<&'e Expr>) {
    out.push(expr);
    for child in expr.children() {
        collect_all(child, out);
    }
}
