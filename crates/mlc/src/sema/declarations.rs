//! Top-level declaration pass
//!
//! Fills the global scope before any usage is checked. Only variables that
//! sit directly under the program node are globals; declarations inside a
//! function body are `StmtKind::Declaration` and never reach this pass.

use crate::common::{Diagnostics, ErrorKind};
use crate::syntax::{FuncDecl, Program, VarDecl};

use super::literal;
use super::scope::{FunctionSignature, GlobalScope};

pub struct DeclarationAnalyzer<'a> {
    scope: &'a mut GlobalScope,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> DeclarationAnalyzer<'a> {
    pub fn new(scope: &'a mut GlobalScope, diagnostics: &'a mut Diagnostics) -> Self {
        Self { scope, diagnostics }
    }

    /// Register every function signature, then every global variable
    pub fn run(&mut self, program: &Program) {
        for func in program.functions() {
            self.declare_function(func);
        }
        for var in program.globals() {
            self.declare_global(var);
        }
    }

    fn declare_function(&mut self, func: &FuncDecl) {
        let signature = FunctionSignature::of(func);
        let text = signature.to_string();
        if !self.scope.declare_function(signature) {
            self.diagnostics.record_at(
                ErrorKind::DuplicateFunctionSignature,
                format!(
                    "function '{}' is already defined with the same parameter list '{}'",
                    func.name, text
                ),
                func.span,
            );
        }
    }

    fn declare_global(&mut self, var: &VarDecl) {
        if !self.scope.declare_variable(&var.name) {
            self.diagnostics.record_at(
                ErrorKind::DuplicateGlobalVariable,
                format!("global variable '{}' is declared more than once", var.name),
                var.span,
            );
        }

        // Checked even when the name was a duplicate
        if let Some(text) = var.init_text() {
            literal::check(self.diagnostics, &var.ty, &text, var.span);
        }
    }
}
