//! Semantic analyzer - runs the passes in order over one program

use std::ops::ControlFlow;

use crate::common::{DiagnosticId, Diagnostics};
use crate::syntax::{ItemKind, Program};

use super::bodies::FunctionBodyAnalyzer;
use super::calls::{CallChecker, CallDepth};
use super::declarations::DeclarationAnalyzer;
use super::scope::GlobalScope;

/// Options for one analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub call_depth: CallDepth,
    /// End the pass at the first undefined call
    pub halt_on_undefined_call: bool,
    pub verbose: bool,
}

/// What a pass leaves behind besides its diagnostics
#[derive(Debug)]
pub struct Analysis {
    pub globals: GlobalScope,
    /// Set when the pass stopped early on an undefined call
    pub halted_by: Option<DiagnosticId>,
}

impl Analysis {
    pub fn halted(&self) -> bool {
        self.halted_by.is_some()
    }
}

/// Semantic analyzer for MiniLang programs.
///
/// Holds no state between runs: every call to [`analyze`](Self::analyze)
/// builds fresh scopes, and all findings go into the caller's collector.
pub struct SemanticAnalyzer {
    config: AnalyzerConfig,
}

impl SemanticAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze a program.
    ///
    /// The declaration pass completes the global scope first. Items are
    /// then visited in source order: function bodies get their local
    /// checks followed by call checks, global initializers and top-level
    /// expressions get call checks.
    pub fn analyze(&self, program: &Program, diagnostics: &mut Diagnostics) -> Analysis {
        let mut globals = GlobalScope::new();

        if self.config.verbose {
            eprintln!("Declaration pass...");
        }
        DeclarationAnalyzer::new(&mut globals, diagnostics).run(program);
        if self.config.verbose {
            eprintln!(
                "  {} function signature(s), {} global variable(s)",
                globals.function_count(),
                globals.variable_count()
            );
        }

        if self.config.verbose {
            eprintln!("Body and call pass...");
        }
        let halted_by = match self.check_items(program, &globals, diagnostics) {
            ControlFlow::Continue(()) => None,
            ControlFlow::Break(id) => {
                if self.config.verbose {
                    eprintln!("  halted on undefined call");
                }
                Some(id)
            }
        };

        Analysis { globals, halted_by }
    }

    fn check_items(
        &self,
        program: &Program,
        globals: &GlobalScope,
        diagnostics: &mut Diagnostics,
    ) -> ControlFlow<DiagnosticId> {
        for item in &program.items {
            match &item.kind {
                ItemKind::Function(func) => {
                    let scope = FunctionBodyAnalyzer::new(globals, diagnostics).analyze(func);
                    if self.config.verbose {
                        eprintln!(
                            "  {}: {} parameter(s), {} local(s)",
                            scope.function(),
                            scope.parameter_count(),
                            scope.local_count()
                        );
                    }
                    self.call_checker(scope.global(), diagnostics).check_function(func)?;
                }
                ItemKind::Variable(var) => {
                    if let Some(init) = &var.init {
                        self.call_checker(globals, diagnostics).check_expr(init)?;
                    }
                }
                ItemKind::Expression(expr) => {
                    self.call_checker(globals, diagnostics).check_expr(expr)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn call_checker<'g, 'd>(&self, globals: &'g GlobalScope, diagnostics: &'d mut Diagnostics) -> CallChecker<'g, 'd> {
        CallChecker::new(globals, diagnostics, self.config.call_depth)
            .halt_on_undefined(self.config.halt_on_undefined_call)
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
